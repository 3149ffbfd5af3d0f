use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

mod render;
mod session;

use jjal::contexts::{App, CataasClient, FileStore, MemoryStore};
use jjal::data::{Caption, Storage};

#[derive(Clone, Debug)]
pub struct Config {
    pub verbose: bool,
    pub endpoint: String,
    pub store_dir: Option<PathBuf>,
    pub ephemeral: bool,
    pub timeout: Duration,
}

impl Config {
    fn client(&self) -> Result<CataasClient> {
        CataasClient::new(&self.endpoint, self.timeout).context("Failed to build HTTP client")
    }

    fn file_store(&self) -> FileStore {
        FileStore::new(self.store_dir.clone())
    }
}

/// Generates one image for `raw_caption`, optionally saving it as a favorite.
pub async fn say(raw_caption: &str, favorite: bool, config: &Config) -> Result<()> {
    let caption = Caption::parse(raw_caption)
        .with_context(|| format!("Cannot use caption '{}'", raw_caption))?;

    if config.ephemeral {
        say_with(MemoryStore::new(), &caption, favorite, config).await
    } else {
        say_with(config.file_store(), &caption, favorite, config).await
    }
}

async fn say_with<S: Storage>(
    store: S,
    caption: &Caption,
    favorite: bool,
    config: &Config,
) -> Result<()> {
    let mut app = App::load(store, config.client()?);
    if config.verbose {
        println!("Generating a cat for \"{}\" via {}", caption, config.endpoint);
    }

    app.submit(caption).await?;

    if favorite {
        if app.add_favorite() {
            println!("✓ Saved to favorites");
        } else {
            println!("⊚ Already a favorite");
        }
    }

    render::card(&app);
    Ok(())
}

/// Prints the saved favorites.
pub fn favorites(config: &Config) -> Result<()> {
    if config.ephemeral {
        favorites_with(MemoryStore::new(), config)
    } else {
        favorites_with(config.file_store(), config)
    }
}

fn favorites_with<S: Storage>(store: S, config: &Config) -> Result<()> {
    let app = App::load(store, config.client()?);
    render::gallery(app.favorites());
    Ok(())
}

/// Runs a prompt loop on stdin until `/quit` or end of input.
pub async fn interactive(config: &Config) -> Result<()> {
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    debug!(endpoint = %config.endpoint, ephemeral = config.ephemeral, "starting session");

    if config.ephemeral {
        session::run(App::load(MemoryStore::new(), config.client()?), input).await
    } else {
        session::run(App::load(config.file_store(), config.client()?), input).await
    }
}
