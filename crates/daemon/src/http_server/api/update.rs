use axum::extract::{Path, State};
use axum::http::StatusCode;
use reqwest::{Client, RequestBuilder, Url};

use crate::database::models::Entity;
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::http_server::api::{parse_link, EntityRouteError};
use crate::ServiceState;

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Private link of the entity
    pub link: Url,
    /// Replacement text
    pub text: String,
}

/// `PUT /{private link}`: the body replaces the text
pub async fn handler(
    State(state): State<ServiceState>,
    Path(link): Path<String>,
    body: String,
) -> Result<StatusCode, EntityRouteError> {
    replace(&state, &link, &body).await
}

/// `GET /{private link}/{text}`: the decoded path segment replaces the text
pub async fn path_handler(
    State(state): State<ServiceState>,
    Path((link, text)): Path<(String, String)>,
) -> Result<StatusCode, EntityRouteError> {
    replace(&state, &link, &text).await
}

async fn replace(state: &ServiceState, link: &str, text: &str) -> Result<StatusCode, EntityRouteError> {
    let (id, secret) = parse_link(link)?.into_parts();
    Entity::replace_text(id, &secret, text, state.database()).await?;
    Ok(StatusCode::OK)
}

impl ApiRequest for UpdateRequest {
    type Response = ();

    fn build_request(self, _base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.put(self.link).body(self.text))
    }
}
