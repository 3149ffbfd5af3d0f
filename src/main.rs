use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use jjal::contexts::DEFAULT_ENDPOINT;

mod cli;

#[derive(Parser)]
#[command(name = "jjal")]
#[command(about = "Make captioned cat pictures and keep your favorites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, global = true, help = "Enable verbose debug output")]
    verbose: bool,

    #[arg(
        long,
        global = true,
        env = "JJAL_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        help = "Base URL of the cat image service"
    )]
    endpoint: String,

    #[arg(
        long,
        global = true,
        env = "JJAL_STORE_DIR",
        help = "Directory holding saved preferences (defaults to .jjal)"
    )]
    store_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Keep preferences in memory only")]
    ephemeral: bool,

    #[arg(
        long,
        global = true,
        env = "JJAL_TIMEOUT_SECS",
        default_value_t = 30,
        help = "Give up on an image request after this many seconds"
    )]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Generate one captioned cat image")]
    Say {
        #[arg(help = "English caption", required = true)]
        words: Vec<String>,

        #[arg(long, help = "Add the new image to favorites")]
        favorite: bool,
    },

    #[command(about = "Show saved favorite images")]
    Favorites,

    #[command(about = "Start an interactive session (default)")]
    Interactive,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli::Config {
        verbose: cli.verbose,
        endpoint: cli.endpoint,
        store_dir: cli.store_dir,
        ephemeral: cli.ephemeral,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Say { words, favorite } => {
            cli::say(&words.join(" "), favorite, &config).await?;
        }
        Commands::Favorites => {
            cli::favorites(&config)?;
        }
        Commands::Interactive => {
            cli::interactive(&config).await?;
        }
    }

    Ok(())
}
