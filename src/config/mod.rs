use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub generation: GenerationConfig,
    pub ui: UiConfig,
    pub input: InputConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// URL or path of `artist_analysis_data.json`.
    pub source: String,
    /// Per-artist song lists kept in memory.
    pub song_cache_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Hugging Face Space hosting the model (`owner/name`).
    pub space_id: String,
    /// Override the Space URL derived from `space_id`.
    pub base_url: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub words_to_show: usize,
    /// Location shown when the app was last closed.
    pub last_location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: "artist_analysis_data.json".to_string(),
            song_cache_size: 16,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            space_id: "bernardoc90/gpt-spanish-lyrics".to_string(),
            base_url: None,
            endpoint: "/predict".to_string(),
            timeout_secs: 120,
            models: vec![
                "GPT2 Fine-Tuned (bernardoc90/gpt2-spanish-lyrics)".to_string(),
                "GPT2 Original (DeepESP/gpt2-spanish)".to_string(),
            ],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            words_to_show: 10,
            last_location: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let proj = ProjectDirs::from("dev", "letras", "letras");
        let data_dir = proj
            .as_ref()
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("letras"));
        Self { data_dir }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "letras", "letras").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

fn resolve_path(override_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match override_path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

fn write_private(path: &Path, raw: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = resolve_path(override_path)?;
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    write_private(&path, &raw)
}

/// Read the config file, writing the defaults first if there is none.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = resolve_path(override_path)?;

    if !path.exists() {
        let cfg = Config::default();
        let raw = toml::to_string_pretty(&cfg).context("serialize default config")?;
        write_private(&path, &raw)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let cfg = load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.data.source, "artist_analysis_data.json");
        assert_eq!(cfg.generation.models.len(), 2);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[data]\nsource = \"https://example.org/artist_analysis_data.json\"\n\n[ui]\nwords_to_show = 25\n",
        )
        .unwrap();

        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.data.source, "https://example.org/artist_analysis_data.json");
        assert_eq!(cfg.data.song_cache_size, 16);
        assert_eq!(cfg.ui.words_to_show, 25);
        assert_eq!(cfg.generation.endpoint, "/predict");
        assert!(cfg.input.mouse);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.ui.last_location = Some("/dataset/alfa/2".into());
        cfg.generation.base_url = Some("http://localhost:7860".into());
        save(&cfg, Some(&path)).unwrap();

        let back = load(Some(&path)).unwrap();
        assert_eq!(back.ui.last_location.as_deref(), Some("/dataset/alfa/2"));
        assert_eq!(back.generation.base_url.as_deref(), Some("http://localhost:7860"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui\nwords_to_show = ").unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
