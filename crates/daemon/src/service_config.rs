use std::path::PathBuf;

use url::Url;

#[derive(Debug)]
pub struct Config {
    // http server configuration
    /// Port for the HTTP server, bound on all interfaces
    pub listen_port: u16,
    /// Public root that issued links are rendered under,
    ///  if not set then http://localhost:{listen_port} will be used
    pub site_url: Option<Url>,

    // data store configuration
    /// a path to a sqlite database, if not set then an
    ///  in-memory database will be used
    pub sqlite_path: Option<PathBuf>,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: crate::state::DEFAULT_LISTEN_PORT,
            site_url: None,
            sqlite_path: None,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
