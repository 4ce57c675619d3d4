use crate::routing::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Resize,
    Reload,
    ToggleHelp,

    // Navigation
    NextView,
    PrevView,
    OpenView(View),
    Back,
    Forward,

    // Text input (location bar, search box, prompt)
    StartLocationInput,
    InputChar(char),
    Backspace,
    ClearInput,
    SubmitInput,
    CancelInput,

    // Artist selection
    PrevArtist,
    NextArtist,
    OpenArtistPicker,
    PickerUp,
    PickerDown,
    PickerConfirm,

    // Lists
    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,

    // Artist stats
    MoreWords,
    FewerWords,
    NextGeneration,
    PrevGeneration,
    TagLeft,
    TagRight,
    ToggleTag,

    // Dataset explorer
    StartSearch,
    OpenSong,
    NextSong,
    PrevSong,
    ScrollLyricUp,
    ScrollLyricDown,

    // Generator
    FocusNext,
    FocusPrev,
    OptionNext,
    OptionPrev,
    EditPrompt,
    Generate,
}
