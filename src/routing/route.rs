use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    ArtistStats,
    GlobalStats,
    Dataset,
    Generator,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::ArtistStats,
        View::GlobalStats,
        View::Dataset,
        View::Generator,
    ];

    pub fn next(self) -> Self {
        match self {
            View::Home => View::ArtistStats,
            View::ArtistStats => View::GlobalStats,
            View::GlobalStats => View::Dataset,
            View::Dataset => View::Generator,
            View::Generator => View::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            View::Home => View::Generator,
            View::ArtistStats => View::Home,
            View::GlobalStats => View::ArtistStats,
            View::Dataset => View::GlobalStats,
            View::Generator => View::Dataset,
        }
    }

    /// Views whose location carries the selected artist.
    pub fn shows_artist_selector(self) -> bool {
        matches!(self, View::ArtistStats | View::Dataset)
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::ArtistStats => "Artist stats",
            View::GlobalStats => "Global stats",
            View::Dataset => "Dataset",
            View::Generator => "Generate",
        }
    }

    fn segment(self) -> &'static str {
        match self {
            View::Home => "",
            View::ArtistStats => "estadisticas",
            View::GlobalStats => "estadisticas-globales",
            View::Dataset => "dataset",
            View::Generator => "generar-letra",
        }
    }
}

/// A parsed hash location such as `#/dataset/los-piojos/3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub view: View,
    pub slug: Option<String>,
    /// 1-based song or generation number.
    pub index: Option<usize>,
}

impl Route {
    pub fn new(view: View) -> Self {
        Self {
            view,
            slug: None,
            index: None,
        }
    }

    pub fn home() -> Self {
        Self::new(View::Home)
    }

    /// Link target for a tab, carrying the selected artist where relevant.
    pub fn for_view(view: View, artist_slug: Option<&str>) -> Self {
        let mut route = Self::new(view);
        if view.shows_artist_selector() {
            route.slug = artist_slug.filter(|s| !s.is_empty()).map(str::to_string);
        }
        route
    }

    /// Same route with a different slug; the index is kept.
    pub fn with_slug(&self, slug: &str) -> Self {
        Self {
            slug: Some(slug.to_string()),
            ..self.clone()
        }
    }

    /// Parse a location. Unknown paths land on the home view.
    pub fn parse(location: &str) -> Self {
        let path = location.trim().trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let Some(first) = segments.first() else {
            return Self::home();
        };
        let view = match *first {
            "estadisticas" => View::ArtistStats,
            "estadisticas-globales" => View::GlobalStats,
            "dataset" => View::Dataset,
            "generar-letra" => View::Generator,
            _ => return Self::home(),
        };

        let mut route = Self::new(view);
        if view.shows_artist_selector() {
            route.slug = segments.get(1).map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            });
            route.index = segments
                .get(2)
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&i| i > 0);
        }
        route
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::home()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.view.segment())?;
        if let Some(slug) = self.slug.as_deref().filter(|s| !s.is_empty()) {
            write!(f, "/{}", urlencoding::encode(slug))?;
            if let Some(index) = self.index {
                write!(f, "/{index}")?;
            }
        }
        Ok(())
    }
}
