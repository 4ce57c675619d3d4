mod analysis;
mod app;
mod config;
mod dataset;
mod generation;
mod input;
mod routing;
#[cfg(test)]
mod test_support;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dataset::{ArtistDataset, DatasetLoader, DatasetSource};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "letras", version, about = "Explore song lyric statistics and generate new lyrics")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset URL or path (overrides `data.source`).
    #[arg(long)]
    data: Option<String>,

    /// Start at this location, e.g. `#/estadisticas/los-piojos/2`.
    #[arg(long)]
    location: Option<String>,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// List artists with their slugs (headless).
    Artists,
    /// Print one artist's statistics and frequent words (headless).
    Stats {
        /// Artist name or slug.
        artist: String,
        /// Number of frequent words to print.
        #[arg(long, default_value_t = analysis::WordsToShow::DEFAULT)]
        top: usize,
    },
    /// Print the statistics of every artist (headless).
    Global {
        #[arg(long, default_value_t = analysis::GLOBAL_TOP_WORDS)]
        top: usize,
    },
    /// List an artist's songs, optionally filtered by a lyric search (headless).
    Songs {
        artist: String,
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the slug of an artist name.
    Slug { name: String },
    /// Check whether the generation Space is reachable.
    Check,
    /// Generate lyrics for an artist (headless).
    Generate {
        artist: String,
        #[arg(long, default_value = "")]
        prompt: String,
        /// Model name or its position in the configured list (1-based).
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };
    if let Some(data) = cli.data.clone() {
        cfg.data.source = data;
    }

    let command = cli.command.unwrap_or(Command::Tui);
    init_tracing(&cfg, matches!(command, Command::Tui), cli.verbose)?;

    let source = DatasetSource::parse(&cfg.data.source).context("dataset source")?;

    match command {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path, source, cli.location)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Artists => {
            let ds = load(&source).await?;
            for name in analysis::artists(&ds) {
                println!("{:<32} {}", name, routing::slugify(&name));
            }
        }
        Command::Stats { artist, top } => {
            let ds = load(&source).await?;
            let name = find(&ds, &artist)?;
            let Some(record) = ds.get(&name) else {
                anyhow::bail!("unknown artist: {artist}");
            };
            let s = record.stats;
            println!("{name}");
            println!("  total words:            {}", analysis::format_thousands(s.total_words));
            println!("  unique words:           {}", analysis::format_thousands(s.unique_words));
            println!("  songs:                  {}", analysis::format_thousands(s.songs));
            println!("  average words per song: {:.2}", s.avg_words_per_song);
            println!("  generations:            {}", record.generations.len());
            println!();
            for (i, w) in analysis::top_words(record, top).iter().enumerate() {
                println!("{:>3}. {:<20} {}", i + 1, w.word, analysis::format_thousands(w.count));
            }
        }
        Command::Global { top } => {
            let ds = load(&source).await?;
            println!(
                "{:<28} {:>8} {:>12} {:>12} {:>10}  top words",
                "artist", "songs", "total", "unique", "avg/song"
            );
            for (name, s) in analysis::global_stats(&ds) {
                let words = ds
                    .get(&name)
                    .map(|r| {
                        analysis::top_words(r, top)
                            .iter()
                            .map(|w| format!("{}: {}", w.word, w.count))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                println!(
                    "{:<28} {:>8} {:>12} {:>12} {:>10.2}  {}",
                    name,
                    analysis::format_thousands(s.songs),
                    analysis::format_thousands(s.total_words),
                    analysis::format_thousands(s.unique_words),
                    s.avg_words_per_song,
                    if words.is_empty() { "N/A".to_string() } else { words },
                );
            }
        }
        Command::Songs { artist, search } => {
            let ds = load(&source).await?;
            let name = find(&ds, &artist)?;
            let url = ds
                .get(&name)
                .and_then(|r| r.url_dataset.as_deref())
                .ok_or(dataset::DatasetError::MissingUrl)?;
            let songs_source = source.join(url)?;
            let songs = DatasetLoader::new()?
                .load_songs(&songs_source)
                .await
                .with_context(|| format!("load songs from {songs_source}"))?;

            let term = search.unwrap_or_default();
            for i in analysis::text::filter_songs(&songs, &term) {
                println!("{:>4}. {}", i + 1, songs[i].name);
                if let Some(snip) = analysis::text::snippet(&songs[i].lyric, &term, analysis::text::SNIPPET_RADIUS) {
                    println!("      {}", snip.text.replace('\n', " "));
                }
            }
        }
        Command::Slug { name } => {
            println!("{}", routing::slugify(&name));
        }
        Command::Check => {
            let client = generation::GradioClient::new(&cfg.generation)?;
            if client.check_availability().await {
                println!("{} is available", client.space_id());
            } else {
                println!("{} is unavailable; see {}", client.space_id(), client.status_page());
            }
        }
        Command::Generate { artist, prompt, model } => {
            let model_choice = pick_model(&cfg.generation.models, model.as_deref())?;
            let client = generation::GradioClient::new(&cfg.generation)?;
            let request = generation::GenerationRequest {
                model_choice,
                artist,
                initial_prompt: prompt,
            };
            let text = client.generate(&request).await.context("generate lyrics")?;
            println!("{text}");
        }
    }

    Ok(())
}

/// Log to stderr for headless commands; the TUI owns the terminal, so it logs
/// to a file in the data dir instead.
fn init_tracing(cfg: &config::Config, tui: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level);

    if tui {
        std::fs::create_dir_all(&cfg.paths.data_dir)
            .with_context(|| format!("create dir {}", cfg.paths.data_dir.display()))?;
        let path = cfg.paths.data_dir.join("letras.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

async fn load(source: &DatasetSource) -> anyhow::Result<ArtistDataset> {
    DatasetLoader::new()?
        .load_dataset(source)
        .await
        .with_context(|| format!("load {source}"))
}

/// Accept an exact artist name or its slug.
fn find(ds: &ArtistDataset, query: &str) -> anyhow::Result<String> {
    if ds.contains_key(query) {
        return Ok(query.to_string());
    }
    let artists = analysis::artists(ds);
    routing::find_artist(&routing::slugify(query), &artists)
        .map(str::to_string)
        .with_context(|| format!("unknown artist: {query}"))
}

fn pick_model(models: &[String], wanted: Option<&str>) -> anyhow::Result<String> {
    let Some(wanted) = wanted else {
        return models.first().cloned().context("no models configured");
    };
    if let Ok(n) = wanted.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| models.get(i))
            .cloned()
            .with_context(|| format!("no model number {n}"));
    }
    Ok(models
        .iter()
        .find(|m| m.eq_ignore_ascii_case(wanted))
        .cloned()
        .unwrap_or_else(|| wanted.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::dataset;

    #[test]
    fn test_find_by_name_or_slug() {
        let ds = dataset(&["Los Piojos", "Alfa"]);
        assert_eq!(find(&ds, "Los Piojos").unwrap(), "Los Piojos");
        assert_eq!(find(&ds, "los-piojos").unwrap(), "Los Piojos");
        assert_eq!(find(&ds, "LOS PIOJOS").unwrap(), "Los Piojos");
        assert!(find(&ds, "nadie").is_err());
    }

    #[test]
    fn test_pick_model() {
        let models = vec!["GPT2 A".to_string(), "GPT2 B".to_string()];
        assert_eq!(pick_model(&models, None).unwrap(), "GPT2 A");
        assert_eq!(pick_model(&models, Some("2")).unwrap(), "GPT2 B");
        assert_eq!(pick_model(&models, Some("gpt2 b")).unwrap(), "GPT2 B");
        assert!(pick_model(&models, Some("3")).is_err());
        assert!(pick_model(&[], None).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["letras", "--data", "d.json", "stats", "alfa", "--top", "3"]).unwrap();
        assert_eq!(cli.data.as_deref(), Some("d.json"));
        assert!(matches!(cli.command, Some(Command::Stats { top: 3, .. })));
    }
}
