use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

#[derive(Debug, Clone, Parser)]
#[command(name = "swipefeed")]
#[command(about = "Swipe through job listings from the terminal")]
pub struct Cli {
    /// Backend base URL; wins over the config file and SWIPEFEED_API_URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to the RON configuration file
    #[arg(long, default_value = "swipefeed.ron")]
    pub config: PathBuf,

    /// Listings revealed per page
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Artificial delay before a page is revealed
    #[arg(long)]
    pub load_delay_ms: Option<u64>,

    /// Skip asking the backend to pull from its upstream before listing
    #[arg(long)]
    pub no_sync: bool,

    /// Serve the built-in listings instead of calling the backend
    #[arg(long)]
    pub demo: bool,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Directory holding the persisted session
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}
