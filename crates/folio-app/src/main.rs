mod cli;
mod content;
mod fetch;
mod renderer;
mod report;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use folio_common::{ConfigError, FolioError};
use folio_config::FolioConfig;
use folio_page::{BackOutcome, HostEvent, NavigatorOptions};
use folio_tabs::{CloseOutcome, TabPlacement};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use content::ContentStore;
use fetch::LocalFetcher;
use session::Session;

const DEFAULT_LOG_DIRECTIVE: &str = "folio=info";

/// Where the session keeps its tab state and reads documents from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionPaths {
    state: PathBuf,
    content_dir: PathBuf,
}

/// CLI flags win over config entries, which win over the data directory.
fn resolve_paths(args: &Args, config: &FolioConfig) -> Result<SessionPaths, ConfigError> {
    let state = match args.state.clone().or_else(|| config.session.state_file.clone()) {
        Some(path) => path,
        None => folio_config::default_data_dir()?.join("tabs.json"),
    };
    let content_dir = match args.content_dir.clone().or_else(|| config.content.dir.clone()) {
        Some(path) => path,
        None => folio_config::default_data_dir()?.join("content"),
    };
    Ok(SessionPaths { state, content_dir })
}

/// `--log-level` first, then the config's level scoped to this binary.
fn log_directive(args: &Args, config: &FolioConfig) -> String {
    match &args.log_level {
        Some(level) if level.contains('=') => level.clone(),
        Some(level) => format!("folio={level}"),
        None => format!("folio={}", config.logging.level.as_directive()),
    }
}

fn load_config(args: &Args) -> FolioConfig {
    let loaded = match &args.config {
        Some(path) => folio_config::load_config_from(path),
        None => folio_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Config load failed, using defaults: {e}");
        FolioConfig::default()
    })
}

fn print_events(events: &[HostEvent]) {
    for line in events.iter().filter_map(report::describe) {
        println!("{line}");
    }
}

fn run(args: Args, config: FolioConfig) -> Result<(), FolioError> {
    let paths = resolve_paths(&args, &config)?;
    let online = !args.offline;
    tracing::info!(
        state = %paths.state.display(),
        content = %paths.content_dir.display(),
        online,
        "Session paths resolved"
    );

    let options = NavigatorOptions::from_config(&config);
    let store = ContentStore::new(&paths.content_dir, options.site.clone());
    let fetcher = Arc::new(LocalFetcher::new(Arc::new(store.clone()), online));

    let mut session = Session::open(options, paths.state, fetcher, Box::new(store), online)?;
    let start_events = session.start()?;

    let events = match args.command {
        None => {
            let mut events = start_events;
            if session.navigator().tabs().no_pages_open() {
                events.extend(session.open_main_page()?);
            }
            events
        }
        Some(Command::Open {
            title,
            new_tab,
            background,
        }) => {
            let placement = new_tab.then_some(if background {
                TabPlacement::Background
            } else {
                TabPlacement::Foreground
            });
            session.open_title(&title, placement)?
        }
        Some(Command::Link { href }) => session.click_link(&href)?,
        Some(Command::Back) => {
            let (outcome, events) = session.back()?;
            if outcome == BackOutcome::Exhausted {
                println!("Nothing to go back to.");
            }
            events
        }
        Some(Command::Refresh) => session.refresh()?,
        Some(Command::Tabs) => {
            println!("{}", report::tab_list(session.navigator().tabs().tabs()));
            Vec::new()
        }
        Some(Command::Select { position }) => session.select_tab(position)?,
        Some(Command::Close { position }) => {
            let (outcome, events) = session.close_tab(position)?;
            if outcome == CloseOutcome::Ignored {
                println!("No tab at position {position}.");
            }
            events
        }
        Some(Command::CloseAll) => session.close_all_tabs()?,
    };
    print_events(&events);

    for event in session.finish()? {
        if let HostEvent::PersistHistory(entry) = event {
            tracing::debug!(
                reference = %entry.reference,
                seconds = entry.time_spent_sec,
                "Visit recorded"
            );
        }
    }
    Ok(())
}

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Config first: it may carry the log level
    let config = load_config(&args);

    // Initialize logging
    let directive = log_directive(&args, &config);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("folio v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    if let Err(e) = run(args, config) {
        tracing::error!("{e}");
        eprintln!("folio: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
