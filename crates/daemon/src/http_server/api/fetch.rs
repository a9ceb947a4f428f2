use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use http::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};

use crate::database::models::Entity;
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::http_server::api::{parse_link, EntityRouteError};
use crate::ServiceState;

#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Public link of the entity
    pub link: Url,
}

/// `GET /{public link}`: the text, served with the stored content type
pub async fn handler(
    State(state): State<ServiceState>,
    Path(link): Path<String>,
) -> Result<Response, EntityRouteError> {
    let (id, secret) = parse_link(&link)?.into_parts();
    let content = Entity::get_for_read(id, &secret, state.database()).await?;

    let content_type = HeaderValue::from_str(&content.content_type)
        .map_err(|_| EntityRouteError::InvalidStoredContentType)?;

    Ok(([(CONTENT_TYPE, content_type)], content.text).into_response())
}

impl ApiRequest for FetchRequest {
    type Response = String;

    fn build_request(self, _base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(self.link))
    }
}
