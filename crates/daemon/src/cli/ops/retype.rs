use clap::Args;

use duolink_daemon::http_server::api::client::{resolve_link, ApiError};
use duolink_daemon::http_server::api::mime::MimeRequest;

#[derive(Args, Debug, Clone)]
pub struct Retype {
    /// Private link, as a full URL or a bare `id!secret`
    pub link: String,

    /// Content type to serve the text with, e.g. `text/plain`
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RetypeError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Retype {
    type Error = RetypeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let link = resolve_link(ctx.client.base_url(), &self.link)?;
        ctx.client
            .call(MimeRequest {
                link,
                content_type: self.content_type.clone(),
            })
            .await?;
        Ok(format!("content type set to {}", self.content_type.trim()))
    }
}
