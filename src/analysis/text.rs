//! Case-insensitive search and highlighting over lyric text.
//!
//! All ranges are byte ranges into the original string and always fall on
//! char boundaries.

use crate::dataset::Song;
use std::ops::Range;

/// Characters of context kept on each side of a snippet match.
pub const SNIPPET_RADIUS: usize = 30;

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Non-overlapping case-insensitive occurrences of `term` in `text`.
pub fn find_matches(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.chars().map(lower).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<(usize, char)> = text.char_indices().map(|(i, c)| (i, lower(c))).collect();

    let mut out = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()].iter().map(|(_, c)| *c).eq(needle.iter().copied()) {
            let start = hay[i].0;
            let end = hay.get(i + needle.len()).map(|(b, _)| *b).unwrap_or(text.len());
            out.push(start..end);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    out
}

pub fn contains(text: &str, term: &str) -> bool {
    term.is_empty() || !find_matches(text, term).is_empty()
}

/// Indices of songs whose lyric contains `term`; every index when empty.
pub fn filter_songs(songs: &[Song], term: &str) -> Vec<usize> {
    songs
        .iter()
        .enumerate()
        .filter(|(_, s)| contains(&s.lyric, term))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub text: String,
    pub matches: Vec<Range<usize>>,
}

/// `...context around the first match...` with the matches located inside it.
pub fn snippet(text: &str, term: &str, radius: usize) -> Option<Snippet> {
    let first = find_matches(text, term).into_iter().next()?;

    let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let first_char = starts.iter().position(|&b| b == first.start)?;
    let match_chars = text[first.clone()].chars().count();

    let from_char = first_char.saturating_sub(radius);
    let to_char = (first_char + match_chars + radius).min(starts.len());
    let from = starts[from_char];
    let to = starts.get(to_char).copied().unwrap_or(text.len());

    let body = &text[from..to];
    let text = format!("...{body}...");
    let matches = find_matches(body, term)
        .into_iter()
        .map(|r| r.start + 3..r.end + 3)
        .collect();
    Some(Snippet { text, matches })
}

/// Whole-word, case-insensitive occurrences of any of `words`, sorted and
/// without overlaps.
pub fn highlight_words(text: &str, words: &[String]) -> Vec<Range<usize>> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut ranges: Vec<Range<usize>> = words
        .iter()
        .flat_map(|w| find_matches(text, w))
        .filter(|r| {
            let before = text[..r.start].chars().next_back();
            let after = text[r.end..].chars().next();
            !before.is_some_and(is_word) && !after.is_some_and(is_word)
        })
        .collect();
    ranges.sort_by_key(|r| (r.start, std::cmp::Reverse(r.end)));

    let mut out: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        if out.last().is_some_and(|last| r.start < last.end) {
            continue;
        }
        out.push(r);
    }
    out
}

/// Split `text` into `(segment, highlighted)` pieces.
pub fn split_highlighted<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<(&'a str, bool)> {
    let mut out = Vec::new();
    let mut pos = 0;
    for r in ranges {
        if r.start < pos || r.end > text.len() {
            continue;
        }
        if r.start > pos {
            out.push((&text[pos..r.start], false));
        }
        out.push((&text[r.clone()], true));
        pos = r.end;
    }
    if pos < text.len() {
        out.push((&text[pos..], false));
    }
    out
}
