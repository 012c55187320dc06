use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shortnotes::cache::CacheRepository;
use shortnotes::config::Config;
use shortnotes::generation::GeminiClient;
use shortnotes::models::{Chapter, NoteSource};
use shortnotes::render::{self, StoreMarks};
use shortnotes::service::NoteService;
use shortnotes::{api, catalog, db};

#[derive(Parser)]
#[command(name = "snx")]
#[command(about = "Class 10 revision notes, generated once and kept locally")]
struct Cli {
    /// Database file (overrides SHORTNOTES_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local HTTP API
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// List subjects
    Subjects,
    /// List chapters, optionally for one subject
    Chapters {
        /// Subject tag: science, maths, social_science, english
        #[arg(short, long)]
        subject: Option<String>,
    },
    /// Search chapters by title or subject name
    Search { query: String },
    /// Print the note for a chapter, generating it on first read
    Read {
        chapter: String,
        /// Write the Markdown to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Discard any cached note and generate a fresh one
        #[arg(long)]
        refresh: bool,
    },
    /// Toggle the bookmark on a chapter
    Bookmark { chapter: String },
    /// List bookmarked chapters
    Bookmarks,
    /// Remove the cached note for a chapter
    Forget { chapter: String },
    /// Remove every cached note
    ClearCache,
}

/// Initialize tracing with output to stderr (CLI commands) or stdout (server)
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "shortnotes=info,tower_http=info".into()),
    );

    if use_stderr {
        // Keep stdout clean for note output
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_database(cli_path: Option<PathBuf>, config: &Config) -> anyhow::Result<db::Database> {
    let database = match cli_path.or_else(|| config.database_path.clone()) {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    database.migrate()?;
    Ok(database)
}

fn lookup_chapter(id: &str) -> anyhow::Result<&'static Chapter> {
    catalog::chapter(id).with_context(|| format!("Unknown chapter `{}`", id))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let config = Config::from_env();
    let database = open_database(cli.db, &config)?;

    run(cli.command, CacheRepository::new(database.clone()), &config).await?;

    database.close()?;
    Ok(())
}

async fn run(
    command: Option<Commands>,
    cache: CacheRepository,
    config: &Config,
) -> anyhow::Result<()> {
    match command {
        Some(Commands::Serve { port }) => serve(cache, config, port).await?,
        None => serve(cache, config, 3000).await?,
        Some(Commands::Subjects) => print!("{}", render::render_subjects()),
        Some(Commands::Chapters { subject }) => {
            let chapters = match subject {
                Some(tag) => {
                    let subject = catalog::subject_by_tag(&tag)
                        .with_context(|| format!("Unknown subject `{}`", tag))?;
                    catalog::chapters_for(subject.id)
                }
                None => catalog::chapters().iter().collect(),
            };
            print!("{}", render::render_chapters(&chapters, &StoreMarks::load(&cache)));
        }
        Some(Commands::Search { query }) => {
            let hits = catalog::search(&query);
            if hits.is_empty() {
                println!("No chapters found matching \"{}\"", query);
            } else {
                print!("{}", render::render_chapters(&hits, &StoreMarks::load(&cache)));
            }
        }
        Some(Commands::Read {
            chapter,
            output,
            refresh,
        }) => {
            let chapter = lookup_chapter(&chapter)?;
            let generator = GeminiClient::from_config(config)?;
            let service = NoteService::new(cache, generator);

            let note = if refresh {
                service.regenerate(chapter).await
            } else {
                service.resolve_note(chapter).await
            };
            if let NoteSource::Fallback { reason } = note.source {
                eprintln!("Note unavailable ({:?}); showing fallback page", reason);
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, &note.content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Saved {} to {}", chapter.title, path.display());
                }
                None => println!("{}", note.content),
            }
        }
        Some(Commands::Bookmark { chapter }) => {
            let chapter = lookup_chapter(&chapter)?;
            let was_bookmarked = cache.is_bookmarked(chapter.id);
            if cache.toggle_bookmark(chapter.id) {
                println!("Bookmarked {}", chapter.title);
            } else if was_bookmarked && !cache.is_bookmarked(chapter.id) {
                println!("Removed bookmark from {}", chapter.title);
            } else {
                anyhow::bail!("Failed to update bookmarks");
            }
        }
        Some(Commands::Bookmarks) => {
            let ids = cache.get_bookmarks();
            let chapters = catalog::bookmarked_chapters(&ids);
            if chapters.is_empty() {
                println!("No bookmarks yet");
            } else {
                print!("{}", render::render_chapters(&chapters, &StoreMarks::load(&cache)));
            }
        }
        Some(Commands::Forget { chapter }) => {
            let chapter = lookup_chapter(&chapter)?;
            if cache.remove_note(chapter.id) {
                println!("Removed cached note for {}", chapter.title);
            } else {
                println!("No cached note for {}", chapter.title);
            }
        }
        Some(Commands::ClearCache) => {
            cache.clear_notes();
            println!("Cleared note cache");
        }
    }

    Ok(())
}

async fn serve(cache: CacheRepository, config: &Config, port: u16) -> anyhow::Result<()> {
    let generator = GeminiClient::from_config(config)?;
    if config.api_key.is_none() {
        tracing::warn!("No API key configured; uncached notes will show a fallback page");
    }

    let app = api::create_router(NoteService::new(cache, generator));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("ShortNotes API listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
