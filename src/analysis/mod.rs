//! Derived views over the loaded dataset
//!
//! Everything here is a pure function of an [`ArtistDataset`]; the results are
//! memoized in a [`Projection`] that is rebuilt only when a new dataset lands.

pub mod text;

use crate::dataset::{ArtistDataset, ArtistRecord, ArtistStats, WordCount};
use std::cmp::Ordering;

/// Rows shown in the global frequent-words table.
pub const GLOBAL_TOP_WORDS: usize = 5;

/// Frequent words offered as highlight tags in the generations viewer.
pub const HIGHLIGHT_CANDIDATES: usize = 20;

/// Artist names in display order.
pub fn artists(dataset: &ArtistDataset) -> Vec<String> {
    let mut names: Vec<String> = dataset.keys().cloned().collect();
    names.sort_by(|a, b| locale_cmp(a, b));
    names
}

/// The `n` most frequent words, count descending. Equal counts keep their
/// order from the dataset.
pub fn top_words(record: &ArtistRecord, n: usize) -> Vec<&WordCount> {
    let mut words: Vec<&WordCount> = record.words.iter().collect();
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(n);
    words
}

pub fn global_stats(dataset: &ArtistDataset) -> Vec<(String, ArtistStats)> {
    artists(dataset)
        .into_iter()
        .filter_map(|name| {
            let stats = dataset.get(&name)?.stats;
            Some((name, stats))
        })
        .collect()
}

pub fn global_top_words(dataset: &ArtistDataset, n: usize) -> Vec<(String, Vec<WordCount>)> {
    artists(dataset)
        .into_iter()
        .filter_map(|name| {
            let words = top_words(dataset.get(&name)?, n).into_iter().cloned().collect();
            Some((name, words))
        })
        .collect()
}

/// Memoized projections of one dataset.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub artists: Vec<String>,
    pub global_stats: Vec<(String, ArtistStats)>,
    pub global_top_words: Vec<(String, Vec<WordCount>)>,
}

impl Projection {
    pub fn new(dataset: &ArtistDataset) -> Self {
        Self {
            artists: artists(dataset),
            global_stats: global_stats(dataset),
            global_top_words: global_top_words(dataset, GLOBAL_TOP_WORDS),
        }
    }
}

/// Number of rows in the per-artist frequent-words table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordsToShow(usize);

impl WordsToShow {
    pub const DEFAULT: usize = 10;
    pub const MIN: usize = 5;
    pub const STEP: usize = 5;

    pub fn new(count: usize) -> Self {
        Self(count.max(Self::MIN))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn increase(self, available: usize) -> Self {
        Self((self.0 + Self::STEP).min(available.max(Self::MIN)))
    }

    pub fn decrease(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }

    /// Clamp to what the newly selected artist actually has.
    pub fn clamp_to(self, available: usize) -> Self {
        Self(self.0.min(available.max(Self::MIN)))
    }
}

impl Default for WordsToShow {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Width of a frequency bar relative to the largest count shown.
pub fn bar_ratio(count: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (count as f64 / max as f64).clamp(0.0, 1.0)
}

/// Case- and accent-insensitive ordering with deterministic tie-breaks.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<char> { s.chars().flat_map(char::to_lowercase).map(fold).collect() };
    primary(a)
        .cmp(&primary(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// `12345` -> `12,345`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
