use clap::Parser;
use std::path::PathBuf;

/// Replay pointer scripts through the map measurement tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Replay script (JSON). Runs the built-in demo when omitted.
    pub script: Option<PathBuf>,

    /// Config file to use instead of the user's config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print measurement reports as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
