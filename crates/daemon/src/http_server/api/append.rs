use axum::extract::{Path, State};
use axum::http::StatusCode;
use reqwest::{Client, RequestBuilder, Url};

use crate::database::models::Entity;
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::http_server::api::{parse_link, EntityRouteError};
use crate::ServiceState;

#[derive(Debug, Clone)]
pub struct AppendRequest {
    /// Private link of the entity
    pub link: Url,
    /// Text added to the end of the stored text
    pub text: String,
}

/// `PATCH /{private link}`: the body is appended to the text
///
/// Not idempotent; a retried request appends twice.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(link): Path<String>,
    body: String,
) -> Result<StatusCode, EntityRouteError> {
    let (id, secret) = parse_link(&link)?.into_parts();
    Entity::append_text(id, &secret, &body, state.database()).await?;
    Ok(StatusCode::OK)
}

impl ApiRequest for AppendRequest {
    type Response = ();

    fn build_request(self, _base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.patch(self.link).body(self.text))
    }
}
