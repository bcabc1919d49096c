//! Main application entry point for photofetch.

use api_client::ApiClient;
use browser::{BrowserState, PageOutcome};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

mod config;
mod export;

use config::{AppConfig, AppConfigOverrides};

#[derive(Parser)]
#[command(
    name = "photofetch",
    author,
    version,
    about = "Browse a Google Photos library and prepare bulk downloads"
)]
struct Cli {
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Override page size for search requests
    #[arg(long)]
    page_size: Option<i32>,
    /// Override the Photos API base URL
    #[arg(long)]
    api_base_url: Option<String>,
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the user's albums
    Albums {
        /// List shared albums instead
        #[arg(long)]
        shared: bool,
    },
    /// Fetch date-filtered photos; filter form: YYYY-MM-DD-YYYY-MM-DD
    Photos {
        /// Date-range filter, start and end joined by dashes
        filter: String,
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Write a download script for the fetched photos; the config
        /// export_path is used when no path is given
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        export: Option<PathBuf>,
    },
    /// Fetch the photos of one album
    AlbumPhotos {
        /// ID of the album
        album_id: String,
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Write a download script for the fetched photos; the config
        /// export_path is used when no path is given
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        export: Option<PathBuf>,
    },
}

enum BrowseTarget {
    Date(String),
    Album(String),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = AppConfigOverrides {
        log_level: cli.log_level.clone(),
        page_size: cli.page_size,
        api_base_url: cli.api_base_url.clone(),
        export_path: None,
    };
    let cfg = AppConfig::load_from(cli.config.clone()).apply_overrides(&overrides);

    std::fs::create_dir_all(&cfg.data_path)?;
    let file_appender = rolling::daily(&cfg.data_path, "photofetch.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
        .with_writer(std::io::stderr.and(file_writer))
        .init();

    let token = auth::access_token();
    let mut notifier = auth::SignInNotifier::new(token.is_some());
    notifier.set_handler(|signed_in| tracing::info!(signed_in, "sign-in state"));

    let client = ApiClient::with_base_url(token, cfg.api_base_url.clone());

    match cli.command {
        Commands::Albums { shared } => {
            let albums = if shared {
                client.list_shared_albums().await?
            } else {
                client.list_albums().await?
            };
            println!("Number of albums: {}", albums.len());
            for album in albums {
                println!(
                    "{} ({} Photos) [{}]",
                    album.title.as_deref().unwrap_or("<untitled>"),
                    album.media_items_count.as_deref().unwrap_or("?"),
                    album.id
                );
            }
        }
        Commands::Photos {
            filter,
            pages,
            export,
        } => {
            browse(&client, &cfg, BrowseTarget::Date(filter), pages, export).await?;
        }
        Commands::AlbumPhotos {
            album_id,
            pages,
            export,
        } => {
            browse(&client, &cfg, BrowseTarget::Album(album_id), pages, export).await?;
        }
    }

    Ok(())
}

async fn browse(
    client: &ApiClient,
    cfg: &AppConfig,
    target: BrowseTarget,
    pages: u32,
    export: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = BrowserState::with_page_size(cfg.page_size);

    for page in 0..pages {
        let outcome = if page == 0 {
            match &target {
                BrowseTarget::Date(filter) => state.request_date_page(client, filter).await?,
                BrowseTarget::Album(album_id) => {
                    state.request_album_page(client, album_id).await?
                }
            }
        } else {
            state.request_next_page(client).await?
        };

        match outcome {
            PageOutcome::Replaced(n) | PageOutcome::Appended(n) => {
                println!("Fetched {} photos ({} total)", n, state.photos().len());
            }
            PageOutcome::Exhausted => {
                println!("All pages fetched");
                break;
            }
            PageOutcome::Idle => break,
        }
    }

    println!("Number of photos: {}", state.photos().len());
    for photo in state.photos() {
        println!("{}", export::download_command(photo));
    }
    if state.has_more() {
        println!("More pages available; rerun with --pages to fetch further");
    }

    if let Some(path) = export {
        let path = if path.as_os_str().is_empty() {
            cfg.export_path.clone()
        } else {
            path
        };
        export::write_download_script(&path, state.photos())?;
        println!("Download script written to {}", path.display());
    }

    Ok(())
}
