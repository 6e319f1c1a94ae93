//! Command-line interface for the terminal client.

use clap::Parser;

/// Default service location when neither the flag nor the environment
/// supplies one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Othello - terminal client for the match service
#[derive(Parser, Debug)]
#[command(name = "othello_tui")]
#[command(about = "Terminal client for the Othello match service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Match service base URL. Falls back to the OTHELLO_SERVER_URL
    /// environment variable, then to the local default.
    #[arg(long)]
    pub server_url: Option<String>,
}

impl Cli {
    /// Resolves the service base URL from flag, environment, or default.
    pub fn resolve_server_url(&self) -> String {
        self.server_url
            .clone()
            .or_else(|| std::env::var("OTHELLO_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}
