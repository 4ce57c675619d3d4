use super::{ArtistDataset, Song, SongList};
use anyhow::Context;
use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no dataset URL provided for this artist")]
    MissingUrl,
    #[error("invalid dataset location {0:?}")]
    InvalidSource(String),
}

/// Where a JSON resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Http(Url),
    File(PathBuf),
}

impl DatasetSource {
    pub fn parse(raw: &str) -> Result<Self, DatasetError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DatasetError::InvalidSource(raw.to_string()));
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).map_err(|_| DatasetError::InvalidSource(raw.to_string()))?;
            return Ok(Self::Http(url));
        }
        Ok(Self::File(PathBuf::from(raw)))
    }

    /// Resolve a `url_dataset` value relative to this resource.
    pub fn join(&self, reference: &str) -> Result<Self, DatasetError> {
        let reference = reference.trim();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Self::parse(reference);
        }
        match self {
            Self::Http(base) => base
                .join(reference)
                .map(Self::Http)
                .map_err(|_| DatasetError::InvalidSource(reference.to_string())),
            Self::File(path) => {
                let rel = Path::new(reference);
                if rel.is_absolute() {
                    return Ok(Self::File(rel.to_path_buf()));
                }
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Self::File(dir.join(rel)))
            }
        }
    }

    /// Stable key for caches.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load state of an asynchronously fetched value.
#[derive(Debug, Clone, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn begin(&mut self) {
        *self = Loadable::Loading;
    }

    /// Record the outcome of the load in progress.
    ///
    /// Returns false (and leaves the state alone) when no load is pending, so
    /// a load completes exactly once.
    pub fn complete<E: fmt::Display>(&mut self, result: Result<T, E>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(v) => Loadable::Ready(v),
            Err(e) => Loadable::Failed(e.to_string()),
        };
        true
    }
}

#[derive(Debug, Clone)]
pub struct DatasetLoader {
    http: reqwest::Client,
}

impl DatasetLoader {
    const USER_AGENT: &'static str = concat!("letras/", env!("CARGO_PKG_VERSION"));

    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("build reqwest client")?;
        Ok(Self { http })
    }

    /// Fetch and parse the main `artist_analysis_data.json` resource.
    pub async fn load_dataset(&self, source: &DatasetSource) -> Result<ArtistDataset, DatasetError> {
        tracing::info!(%source, "loading artist dataset");
        let raw = self.fetch(source).await?;
        let dataset: ArtistDataset = serde_json::from_slice(&raw)?;
        tracing::info!(artists = dataset.len(), "artist dataset loaded");
        Ok(dataset)
    }

    /// Fetch one artist's song list.
    pub async fn load_songs(&self, source: &DatasetSource) -> Result<Vec<Song>, DatasetError> {
        tracing::debug!(%source, "loading artist songs");
        let raw = self.fetch(source).await?;
        let list: SongList = serde_json::from_slice(&raw)?;
        Ok(list.songs)
    }

    async fn fetch(&self, source: &DatasetSource) -> Result<Vec<u8>, DatasetError> {
        match source {
            DatasetSource::Http(url) => {
                let response = self.http.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(DatasetError::Status(status.as_u16()));
                }
                Ok(response.bytes().await?.to_vec())
            }
            DatasetSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| DatasetError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Reply, serve};

    const DATA: &str = r#"{
        "Zeta": {"stats": {"totalWords": 10, "uniqueWords": 5, "songs": 2, "avgWordsPerSong": 5.0},
                 "words": [], "generations": [], "url_dataset": "songs/zeta.json"},
        "Alfa": {"stats": {"totalWords": 20, "uniqueWords": 8, "songs": 4, "avgWordsPerSong": 5.0}}
    }"#;

    #[test]
    fn test_source_parse_and_join() {
        let http = DatasetSource::parse("https://example.org/app/artist_analysis_data.json").unwrap();
        assert_eq!(
            http.join("songs/zeta.json").unwrap().to_string(),
            "https://example.org/app/songs/zeta.json"
        );
        assert_eq!(
            http.join("https://cdn.example.org/x.json").unwrap().to_string(),
            "https://cdn.example.org/x.json"
        );

        let file = DatasetSource::parse("data/artist_analysis_data.json").unwrap();
        assert_eq!(
            file.join("songs/zeta.json").unwrap(),
            DatasetSource::File(PathBuf::from("data/songs/zeta.json"))
        );

        assert!(DatasetSource::parse("   ").is_err());
    }

    #[test]
    fn test_loadable_completes_once() {
        let mut state: Loadable<u32> = Loadable::Idle;
        assert!(!state.complete::<String>(Ok(1)));

        state.begin();
        assert!(state.is_loading());
        assert!(state.complete::<String>(Err("boom".into())));
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("boom"));

        // A late second completion does not overwrite the first.
        assert!(!state.complete::<String>(Ok(7)));
        assert!(state.ready().is_none());
    }

    #[tokio::test]
    async fn test_load_dataset_over_http() {
        let server = serve(vec![("/artist_analysis_data.json", Reply::json(200, DATA))]).await;
        let loader = crate::dataset::DatasetLoader::new().unwrap();
        let source = DatasetSource::parse(&server.url("/artist_analysis_data.json")).unwrap();

        let ds = loader.load_dataset(&source).await.unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds["Alfa"].stats.songs, 4);
    }

    #[tokio::test]
    async fn test_load_dataset_http_error() {
        let server = serve(vec![("/artist_analysis_data.json", Reply::json(500, "oops"))]).await;
        let loader = DatasetLoader::new().unwrap();
        let source = DatasetSource::parse(&server.url("/artist_analysis_data.json")).unwrap();

        let err = loader.load_dataset(&source).await.unwrap_err();
        assert!(matches!(err, DatasetError::Status(500)));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_load_dataset_malformed_json() {
        let server = serve(vec![("/data.json", Reply::json(200, "{not json"))]).await;
        let loader = DatasetLoader::new().unwrap();
        let source = DatasetSource::parse(&server.url("/data.json")).unwrap();

        let err = loader.load_dataset(&source).await.unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("artist_analysis_data.json");
        std::fs::write(&main, DATA).unwrap();
        std::fs::create_dir_all(dir.path().join("songs")).unwrap();
        std::fs::write(
            dir.path().join("songs/zeta.json"),
            r#"{"songs": [{"name": "Uno", "lyric": "la la"}]}"#,
        )
        .unwrap();

        let loader = DatasetLoader::new().unwrap();
        let source = DatasetSource::File(main);
        let ds = loader.load_dataset(&source).await.unwrap();
        let songs_src = source.join(ds["Zeta"].url_dataset.as_deref().unwrap()).unwrap();
        let songs = loader.load_songs(&songs_src).await.unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "Uno");

        let missing = DatasetSource::File(dir.path().join("nope.json"));
        assert!(matches!(
            loader.load_dataset(&missing).await,
            Err(DatasetError::Io { .. })
        ));
    }
}
