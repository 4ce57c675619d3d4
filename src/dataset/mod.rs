//! Lyric-analysis dataset
//!
//! This module provides:
//! - The records stored in `artist_analysis_data.json`
//! - Per-artist song lists referenced by `url_dataset`
//! - A loader for both, over HTTP or from local files

pub mod loader;

use serde::Deserialize;
use std::collections::BTreeMap;

pub use loader::{DatasetError, DatasetLoader, DatasetSource, Loadable};

/// Whole dataset keyed by artist name.
pub type ArtistDataset = BTreeMap<String, ArtistRecord>;

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRecord {
    pub stats: ArtistStats,
    #[serde(default)]
    pub words: Vec<WordCount>,
    #[serde(default)]
    pub generations: Vec<Generation>,
    #[serde(default)]
    pub url_dataset: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub total_words: u64,
    pub unique_words: u64,
    pub songs: u64,
    pub avg_words_per_song: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// A pre-computed lyric sample.
#[derive(Debug, Clone, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lyric: String,
}

/// Body of a per-artist `url_dataset` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongList {
    #[serde(default)]
    pub songs: Vec<Song>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(words: &[(&str, u64)], songs: u64) -> ArtistRecord {
        ArtistRecord {
            stats: ArtistStats {
                total_words: words.iter().map(|(_, c)| c).sum(),
                unique_words: words.len() as u64,
                songs,
                avg_words_per_song: 0.0,
            },
            words: words
                .iter()
                .map(|(w, c)| WordCount {
                    word: w.to_string(),
                    count: *c,
                })
                .collect(),
            generations: Vec::new(),
            url_dataset: None,
        }
    }

    pub fn dataset(names: &[&str]) -> ArtistDataset {
        names
            .iter()
            .map(|n| (n.to_string(), record(&[("amor", 3), ("vida", 2)], 1)))
            .collect()
    }
}
