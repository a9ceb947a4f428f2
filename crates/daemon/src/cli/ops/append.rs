use clap::Args;

use duolink_daemon::http_server::api::append::AppendRequest;
use duolink_daemon::http_server::api::client::{resolve_link, ApiError};

#[derive(Args, Debug, Clone)]
pub struct Append {
    /// Private link, as a full URL or a bare `id!secret`
    pub link: String,

    /// Text to add to the end; running the command twice appends twice
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Append {
    type Error = AppendError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let link = resolve_link(ctx.client.base_url(), &self.link)?;
        ctx.client
            .call(AppendRequest {
                link,
                text: self.text.clone(),
            })
            .await?;
        Ok("text appended".to_string())
    }
}
