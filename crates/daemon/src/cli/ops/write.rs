use clap::Args;

use duolink_daemon::http_server::api::client::{resolve_link, ApiError};
use duolink_daemon::http_server::api::update::UpdateRequest;

#[derive(Args, Debug, Clone)]
pub struct Write {
    /// Private link, as a full URL or a bare `id!secret`
    pub link: String,

    /// Replacement text
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Write {
    type Error = WriteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let link = resolve_link(ctx.client.base_url(), &self.link)?;
        ctx.client
            .call(UpdateRequest {
                link,
                text: self.text.clone(),
            })
            .await?;
        Ok("text replaced".to_string())
    }
}
