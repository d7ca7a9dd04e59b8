//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::new::NewPostOptions;
use folio_rs::content::PostKind;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A small blog engine for Markdown posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Kind of post (note, article)
        #[arg(short, long, default_value = "note")]
        kind: PostKind,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,

        /// File name to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Validate every post without generating
    Check,

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, draft, tag, kind)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,tower_http=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            title,
            kind,
            draft,
            slug,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            let options = NewPostOptions { kind, draft, slug };
            let path = folio.new_post(&title, &options)?;
            println!("Created: {}", path.display());
        }

        Commands::Generate => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, !r#static).await?;
        }

        Commands::Check => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::check::run(&folio)?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type, json } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type, json)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
