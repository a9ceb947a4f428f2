pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "duolink")]
#[command(about = "Paste service addressed by public and private links", version)]
pub struct Args {
    /// Daemon to talk to (defaults to localhost on the configured port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the duolink config directory (defaults to ~/.duolink)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
