mod albums_cmd;
mod config;
mod favorites_cmd;
mod photos_cmd;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use picfolio_api_client::picfolio_api::RemoteGateway;
use picfolio_api_client::ApiClient;
use picfolio_local_store::LocalStore;
use picfolio_sync::GalleryClient;

#[derive(Parser)]
#[command(name = "picfolio", about = "picfolio CLI - browse photos, favorites and albums")]
struct Cli {
    /// Username to act as
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the date-grouped photo feed
    Photos {
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Only show photos whose id contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// List or toggle favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Manage albums
    Albums {
        #[command(subcommand)]
        action: AlbumsAction,
    },

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorited photo ids
    List,
    /// Flip the favorite state of a photo
    Toggle { photo_id: String },
}

#[derive(Subcommand)]
enum AlbumsAction {
    /// List album summaries
    List,
    /// Show an album's grouped contents
    Show { album_id: String },
    /// Create an album, optionally with initial photos
    Create {
        title: String,
        #[arg(long = "photo")]
        photos: Vec<String>,
    },
    /// Rename an album
    Rename { album_id: String, title: String },
    /// Change an album's date (YYYY-MM-DD)
    Redate { album_id: String, date: String },
    /// Delete an album
    Delete { album_id: String },
    /// Attach photos to an album
    AddPhotos {
        album_id: String,
        #[arg(required = true)]
        photos: Vec<String>,
    },
    /// Detach photos from an album
    RemovePhotos {
        album_id: String,
        #[arg(required = true)]
        photos: Vec<String>,
    },
}

/// Build the sync core and bind the requested principal. A failed bootstrap
/// refresh is reported but not fatal: the persisted seed stays usable.
async fn bound_client(user: Option<String>) -> Result<GalleryClient> {
    let user = user.context("--user is required for this command")?;
    let cfg = config::load()?;

    let gateway: Arc<dyn RemoteGateway> = Arc::new(ApiClient::new(
        &cfg.server.url,
        Duration::from_secs(cfg.server.request_timeout_secs),
    )?);
    let store = match LocalStore::open_default() {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            tracing::warn!("local store unavailable, running without offline seed: {e}");
            None
        }
    };

    let client = GalleryClient::new(gateway, store);
    if let Err(e) = client.bind_principal(&user).await {
        eprintln!("warning: could not refresh from {}: {e}", cfg.server.url);
    }
    Ok(client)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Photos { pages, search } => photos_cmd::run(cli.user, pages, search).await,
        Commands::Favorites { action } => favorites_cmd::run(cli.user, action).await,
        Commands::Albums { action } => albums_cmd::run(cli.user, action).await,
        Commands::Config { server } => {
            if server.is_none() {
                config::show()
            } else {
                config::set(server)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
