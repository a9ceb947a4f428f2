use clap::Args;
use url::Url;

use duolink_daemon::state::AppState;
use duolink_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override HTTP server port (default from config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Public root for issued links (e.g., https://paste.example.com)
    #[arg(long, env = "DUOLINK_SITE_URL")]
    pub site_url: Option<Url>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] duolink_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.duolink)
        let state = AppState::load(ctx.config_path.clone())?;

        // Flags win over config
        let listen_port = self.port.unwrap_or(state.config.listen_port);
        let site_url = self.site_url.clone().or(state.config.site_url.clone());

        let config = ServiceConfig {
            listen_port,
            site_url,
            sqlite_path: Some(state.db_path),
            log_level: tracing::Level::INFO,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
