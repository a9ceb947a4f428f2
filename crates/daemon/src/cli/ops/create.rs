use clap::Args;

use duolink_daemon::http_server::api::client::ApiError;
use duolink_daemon::http_server::api::create::{CreateRequest, CreateResponse};

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Initial text of the entry
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = CreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = CreateRequest {
            text: self.text.clone(),
        };
        let response: CreateResponse = ctx.client.call(request).await?;

        Ok(format!(
            "Public link:  {}\nPrivate link: {}",
            response.public_link, response.private_link
        ))
    }
}
