use clap::Args;

use duolink_daemon::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[allow(dead_code)]
    #[error("Health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();

        // 1. Check config directory
        lines.push("Config:".to_string());
        match AppState::load(ctx.config_path.clone()) {
            Ok(state) => {
                lines.push(format!("  directory:   {}", state.app_dir.display()));
                lines.push("  config.toml: OK".to_string());
                lines.push("  db.sqlite:   OK".to_string());
                lines.push(format!("  listen_port: {}", state.config.listen_port));
                match state.config.site_url {
                    Some(url) => lines.push(format!("  site_url:    {}", url)),
                    None => lines.push("  site_url:    (localhost)".to_string()),
                }
            }
            Err(e) => {
                lines.push(format!("  error: {}", e));
            }
        }

        // 2. Check daemon liveness and readiness
        let base = ctx.client.base_url();
        let client = ctx.client.http_client();

        lines.push(String::new());
        lines.push(format!("Daemon ({}):", base));

        for probe in ["livez", "readyz"] {
            let url = format!(
                "{}/_status/{}",
                base.as_str().trim_end_matches('/'),
                probe
            );
            let status = match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => "OK".to_string(),
                Ok(resp) => format!("UNHEALTHY ({})", resp.status()),
                Err(_) => "NOT REACHABLE".to_string(),
            };
            lines.push(format!("  {:<7} {}", format!("{}:", probe), status));
        }

        Ok(lines.join("\n"))
    }
}
