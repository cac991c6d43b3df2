use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Folio: a multi-tab reader for locally stored wiki documents.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error or a full filter directive).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Saved tab set location.
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Directory holding stored documents.
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,

    /// Behave as if there were no connection to the content source.
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a document by title.
    Open {
        title: String,
        /// Open in a new tab instead of the active one.
        #[arg(long)]
        new_tab: bool,
        /// With --new-tab, keep the current tab in front.
        #[arg(long, requires = "new_tab")]
        background: bool,
    },
    /// Follow a link as if it had been clicked in the page.
    Link { href: String },
    /// Go back in the active tab.
    Back,
    /// Reload the document on screen.
    Refresh,
    /// List open tabs.
    Tabs,
    /// Bring the tab at a position to the front.
    Select { position: usize },
    /// Close the tab at a position.
    Close { position: usize },
    /// Close every tab and end the session.
    CloseAll,
}

pub fn parse() -> Args {
    Args::parse()
}
