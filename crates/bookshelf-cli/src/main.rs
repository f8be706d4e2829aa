mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use bookshelf_core::{AppConfig, Book, BookStore, BookshelfError, Database};
use bookshelf_server::AppState;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "bookshelf",
    about = "REST API for a small book catalogue",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.config/bookshelf/config.toml or $BOOKSHELF_CONFIG).
    #[arg(long = "config", global = true)]
    config_file: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Seed an empty store with the default books first.
        #[arg(long)]
        seed: bool,
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Seed an empty store with the default books.
    Seed {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// List all books.
    List {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Show a single book.
    Get {
        id: i64,
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Default)]
struct StoreArgs {
    /// SQLite database file (overrides the config file).
    #[arg(long, conflicts_with = "in_memory")]
    database: Option<PathBuf>,

    /// Use a throwaway in-memory store.
    #[arg(long)]
    in_memory: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Print the config file path.
    Path,
}

// ─── Main ────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config_file {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    logging::init(&config.logging)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            seed,
            store,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let db = open_store(&config, &store)?;
            if seed || config.database.seed {
                let inserted = db.seed_defaults()?;
                tracing::info!(inserted, "seeded store");
            }

            let addr = config.bind_address();
            bookshelf_server::serve(&addr, AppState::new(db), shutdown_signal()).await?;
        }

        Commands::Seed { store } => {
            let db = open_store(&config, &store)?;
            let inserted = db.seed_defaults()?;
            db.close()?;

            if cli.json {
                print_json(&serde_json::json!({ "status": "ok", "data": { "inserted": inserted } }))?;
            } else if inserted == 0 {
                println!("Store already has books; nothing seeded.");
            } else {
                println!("Seeded {inserted} books.");
            }
        }

        Commands::List { store } => {
            let db = open_store(&config, &store)?;
            let books = db.list_all()?;
            db.close()?;

            if cli.json {
                print_json(&serde_json::json!({ "status": "ok", "data": books }))?;
            } else if books.is_empty() {
                println!("No books. Use `bookshelf seed` or POST /api/books to add some.");
            } else {
                for book in &books {
                    print_book_line(book);
                }
            }
        }

        Commands::Get { id, store } => {
            let db = open_store(&config, &store)?;
            match db.get_book(id) {
                Ok(book) => {
                    if cli.json {
                        print_json(&serde_json::json!({ "status": "ok", "data": book }))?;
                    } else {
                        print_book_line(&book);
                    }
                }
                Err(BookshelfError::BookNotFound(_)) => {
                    if cli.json {
                        print_json(&serde_json::json!({ "status": "error", "error": "not_found" }))?;
                    } else {
                        eprintln!("Book not found: {id}");
                    }
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                if cli.json {
                    print_json(&serde_json::to_value(&config)?)?;
                } else {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
            ConfigAction::Path => {
                let path = cli.config_file.unwrap_or_else(AppConfig::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn open_store(config: &AppConfig, args: &StoreArgs) -> Result<Database> {
    if args.in_memory {
        return Ok(Database::open_in_memory()?);
    }
    let path = args.database.clone().or_else(|| config.database_path());
    let db = match path {
        Some(path) => Database::open(&path)?,
        None => Database::open_in_memory()?,
    };
    Ok(db)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
    }
    tracing::info!("shutting down");
}

fn print_book_line(book: &Book) {
    println!(
        "{id:>4}  {title:<40}  {author:<25}  {year}",
        id = book.id,
        title = book.title,
        author = book.author,
        year = book.year_published,
    );
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
