use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use mixport::{cli, config, error, types::AuthAttempt};
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

    /// Show a source playlist from a shared URL
    Show(ShowOptions),

    /// Copy a source playlist into your own account
    Migrate(MigrateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Playlist or album URL
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateOptions {
    /// Playlist or album URL
    url: String,

    /// Name for the created playlist (defaults to the source name)
    #[clap(long)]
    name: Option<String>,

    /// Description for the created playlist (defaults to the source description)
    #[clap(long)]
    description: Option<String>,
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
            let auth_attempt: Arc<Mutex<Option<AuthAttempt>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&auth_attempt)).await;
        }
        Command::Show(opt) => cli::show(opt.url).await,
        Command::Migrate(opt) => cli::migrate(opt.url, opt.name, opt.description).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
