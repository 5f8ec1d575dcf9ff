use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsfeed")]
#[command(about = "Live feed of NSE high impact corporate announcements")]
#[command(version)]
pub struct Cli {
    /// Base URL of the news backend (overrides NEWS_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the current announcements once and print them
    List,

    /// Ask the backend to regenerate its announcements, then print the reloaded feed
    Refresh,

    /// Keep a live view open: auto-refresh on a timer, type 'r' to refresh, 'q' to quit
    Watch,
}
