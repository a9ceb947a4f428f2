use clap::Args;
use url::Url;

use duolink_daemon::state::{AppConfig, AppState, DEFAULT_LISTEN_PORT};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// HTTP server port
    #[arg(long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Public root for issued links (defaults to http://localhost:{port})
    #[arg(long)]
    pub site_url: Option<Url>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] duolink_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            listen_port: self.port,
            site_url: self.site_url.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let site_url_str = match state.config.site_url {
            Some(ref url) => url.to_string(),
            None => format!("http://localhost:{}", state.config.listen_port),
        };

        let output = format!(
            "Initialized duolink directory at: {}\n\
             - Database: {}\n\
             - Config: {}\n\
             - Listen port: {}\n\
             - Site URL: {}",
            state.app_dir.display(),
            state.db_path.display(),
            state.config_path.display(),
            state.config.listen_port,
            site_url_str
        );

        Ok(output)
    }
}
