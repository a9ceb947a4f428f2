use clap::Args;

use duolink_daemon::http_server::api::client::{resolve_link, ApiError};
use duolink_daemon::http_server::api::fetch::FetchRequest;

#[derive(Args, Debug, Clone)]
pub struct Read {
    /// Public link, as a full URL or a bare `id!secret`
    pub link: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Read {
    type Error = ReadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let link = resolve_link(ctx.client.base_url(), &self.link)?;
        Ok(ctx.client.call(FetchRequest { link }).await?)
    }
}
