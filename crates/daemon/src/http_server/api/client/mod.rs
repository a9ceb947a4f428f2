#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

use reqwest::{Client, RequestBuilder, Response, Url};

use common::prelude::Link;

/// A typed request against the paste API, implemented next to each route handler
pub trait ApiRequest {
    type Response: ApiResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}

/// How a successful response body is decoded for a request
#[async_trait::async_trait]
pub trait ApiResponse: Sized {
    async fn from_response(response: Response) -> Result<Self, ApiError>;
}

#[async_trait::async_trait]
impl ApiResponse for () {
    async fn from_response(_response: Response) -> Result<Self, ApiError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl ApiResponse for String {
    async fn from_response(response: Response) -> Result<Self, ApiError> {
        Ok(response.text().await?)
    }
}

/// Turn what a user typed into the URL of a link
///
/// Accepts either a full `http(s)` URL as returned by `/create`, or a bare
/// `{id}!{secret}` segment which is placed under `base_url`.
pub fn resolve_link(base_url: &Url, input: &str) -> Result<Url, ApiError> {
    if let Ok(url) = Url::parse(input) {
        if matches!(url.scheme(), "http" | "https") {
            return Ok(url);
        }
    }

    let link: Link = input.parse()?;
    Ok(link.to_url(base_url)?)
}
