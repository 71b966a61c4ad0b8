use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporlrec::{cli, config, error, warning};

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
    /// Run the HTTP API
    Serve(ServeOptions),

    /// Search tracks
    Search(SearchOptions),

    /// List tracks related to a seed track
    Recommend(RecommendOptions),

    /// Show details of a single track
    Track(TrackOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Port to listen on (overrides PORT)
    #[clap(long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query
    pub query: String,

    /// Maximum number of tracks (1-50)
    #[clap(long)]
    pub limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Spotify ID of the seed track
    pub track_id: String,

    /// Maximum number of tracks (1-50)
    #[clap(long)]
    pub limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Spotify ID of the track
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!(
            "Invalid configuration: {}. SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set in the environment or a .env file.",
            e
        ),
    };

    match cli.command {
        Command::Serve(opt) => {
            let config = match opt.port {
                Some(port) => config.with_port(port),
                None => config,
            };
            cli::serve(config).await
        }
        Command::Search(opt) => cli::search(config, opt.query, opt.limit).await,
        Command::Recommend(opt) => cli::recommend(config, opt.track_id, opt.limit).await,
        Command::Track(opt) => cli::track(config, opt.id).await,
        Command::Completions(_) => {}
    }
}
