use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tastecli::{
    cli, config, error,
    taste::{TuneConfig, Weights},
    types::PkceToken,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the taste profile built from your listening history
    Profile,

    #[clap(about = "Create a playlist tuned to your taste")]
    Tune(TuneOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TuneOptions {
    /// Playlist length
    #[clap(long, default_value_t = 20)]
    pub size: usize,

    /// Candidate pool size gathered before scoring
    #[clap(long, default_value_t = 100)]
    pub candidates: usize,

    /// Playlist name (defaults to a dated name)
    #[clap(long)]
    pub name: Option<String>,

    /// Cap on tracks per artist in the selection
    #[clap(long)]
    pub max_per_artist: Option<usize>,

    /// Diversity sub-score for tracks already in your top history
    #[clap(long, default_value_t = 0.0)]
    pub known_penalty: f64,

    /// Weight of the artist-match component
    #[clap(long)]
    pub artist_weight: Option<f64>,

    /// Weight of the genre-match component
    #[clap(long)]
    pub genre_weight: Option<f64>,

    /// Weight of the popularity component
    #[clap(long)]
    pub popularity_weight: Option<f64>,

    /// Weight of the audio-match component
    #[clap(long)]
    pub audio_weight: Option<f64>,

    /// Weight of the diversity component
    #[clap(long)]
    pub diversity_weight: Option<f64>,
}

impl TuneOptions {
    fn into_config(self) -> TuneConfig {
        let mut weights = Weights::default();
        if let Some(w) = self.artist_weight {
            weights.artist_match = w;
        }
        if let Some(w) = self.genre_weight {
            weights.genre_match = w;
        }
        if let Some(w) = self.popularity_weight {
            weights.popularity = w;
        }
        if let Some(w) = self.audio_weight {
            weights.audio_match = w;
        }
        if let Some(w) = self.diversity_weight {
            weights.diversity = w;
        }

        let negative = [
            weights.artist_match,
            weights.genre_match,
            weights.popularity,
            weights.audio_match,
            weights.diversity,
        ]
        .iter()
        .any(|w| *w < 0.0);
        if negative || self.known_penalty < 0.0 {
            error!("Weights and the known penalty must be non-negative.");
        }

        TuneConfig {
            playlist_size: self.size,
            candidate_pool_size: self.candidates,
            max_per_artist: self.max_per_artist,
            known_penalty: self.known_penalty,
            weights,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Profile => cli::profile().await,
        Command::Tune(opt) => {
            let name = opt.name.clone();
            cli::tune(opt.into_config(), name).await;
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
