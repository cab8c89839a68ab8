mod server;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, ImportService, QuestionSource, RemoteSource, RepositorySource, StaticSource};
use storage::repository::Storage;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

use crate::server::{ServerState, build_router};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DEFAULT_SOURCE_URL: &str = "http://127.0.0.1:5000/api/quiz";
const DEFAULT_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSource { raw: String },
    InvalidDbUrl { raw: String },
    MissingFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSource { raw } => {
                write!(f, "invalid --source value: {raw} (expected static, db or remote)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingFile => write!(f, "import requires a file path"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn db_value(args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
    let value = require_value(args, "--db")?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: value });
    }
    Ok(normalize_sqlite_url(value))
}

fn env_db_url() -> String {
    std::env::var("QUIZ_DB_URL")
        .ok()
        .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url)
}

struct DesktopApp {
    source: Arc<dyn QuestionSource>,
}

impl UiApp for DesktopApp {
    fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.source)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--source static|db|remote] [--db <sqlite_url>] [--url <http_url>]");
    eprintln!("  cargo run -p app -- serve  [--db <sqlite_url>] [--addr <host:port>]");
    eprintln!("  cargo run -p app -- import <file> [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --source static");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --url {DEFAULT_SOURCE_URL}");
    eprintln!("  --addr {DEFAULT_ADDR}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE, QUIZ_DB_URL, QUIZ_SOURCE_URL, QUIZ_ADDR, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Serve,
    Import,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "serve" => Some(Self::Serve),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Static,
    Db,
    Remote,
}

impl SourceKind {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "db" | "sqlite" => Ok(Self::Db),
            "remote" | "http" => Ok(Self::Remote),
            _ => Err(ArgsError::InvalidSource {
                raw: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
struct UiArgs {
    source: SourceKind,
    db_url: String,
    source_url: String,
}

impl UiArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut source = match std::env::var("QUIZ_SOURCE") {
            Ok(raw) => SourceKind::parse(&raw)?,
            Err(_) => SourceKind::Static,
        };
        let mut db_url = env_db_url();
        let mut source_url =
            std::env::var("QUIZ_SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--source" => source = SourceKind::parse(&require_value(args, "--source")?)?,
                "--db" => db_url = db_value(args)?,
                "--url" => source_url = require_value(args, "--url")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            source,
            db_url,
            source_url,
        })
    }
}

#[derive(Debug)]
struct ServeArgs {
    db_url: String,
    addr: String,
}

impl ServeArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = env_db_url();
        let mut addr = std::env::var("QUIZ_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = db_value(args)?,
                "--addr" => addr = require_value(args, "--addr")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, addr })
    }
}

#[derive(Debug)]
struct ImportArgs {
    db_url: String,
    file: std::path::PathBuf,
}

impl ImportArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = env_db_url();
        let mut file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = db_value(args)?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if file.is_none() => file = Some(std::path::PathBuf::from(arg)),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            file: file.ok_or(ArgsError::MissingFile)?,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn open_storage(db_url: &str) -> Result<Storage, Box<dyn std::error::Error>> {
    prepare_sqlite_file(db_url)?;
    let storage = Storage::sqlite(db_url).await?;
    tracing::info!(db = %db_url, "question bank ready");
    Ok(storage)
}

async fn build_source(args: &UiArgs) -> Result<Arc<dyn QuestionSource>, Box<dyn std::error::Error>> {
    let source: Arc<dyn QuestionSource> = match args.source {
        SourceKind::Static => Arc::new(StaticSource::sample()?),
        SourceKind::Db => {
            let storage = open_storage(&args.db_url).await?;
            Arc::new(RepositorySource::new(storage.questions))
        }
        SourceKind::Remote => Arc::new(RemoteSource::new(&args.source_url)?),
    };
    tracing::info!(source = %source.describe(), "question source configured");
    Ok(source)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let report = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };

    match cmd {
        Command::Ui => {
            let args = UiArgs::parse(&mut iter).map_err(report)?;
            let source = build_source(&args).await?;
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { source });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Simple Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Serve => {
            let args = ServeArgs::parse(&mut iter).map_err(report)?;
            let storage = open_storage(&args.db_url).await?;
            let import = ImportService::new(Clock::System, Arc::clone(&storage.questions));
            let router = build_router(ServerState::new(storage.questions, import));

            let listener = TcpListener::bind(&args.addr).await?;
            tracing::info!(addr = %args.addr, "quiz server listening");
            axum::serve(listener, router).await?;
            Ok(())
        }
        Command::Import => {
            let args = ImportArgs::parse(&mut iter).map_err(report)?;
            let contents = tokio::fs::read_to_string(&args.file).await?;
            let storage = open_storage(&args.db_url).await?;
            let import = ImportService::new(Clock::System, storage.questions);
            let imported = import.import_text(&contents).await?;
            println!(
                "imported {} question(s) from {}",
                imported.question_count,
                args.file.display()
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
