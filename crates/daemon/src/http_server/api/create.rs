use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{Link, LinkError};

use crate::database::models::{Entity, EntityError};
use crate::http_server::api::client::{ApiError, ApiRequest, ApiResponse};
use crate::ServiceState;

#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Initial text, sent as the request body
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    #[serde(rename = "Public link")]
    pub public_link: Url,
    #[serde(rename = "Private link")]
    pub private_link: Url,
}

/// `GET /create`: a new entity with no text
pub async fn handler(State(state): State<ServiceState>) -> Result<impl IntoResponse, CreateError> {
    create(&state, None).await
}

/// `POST /create`: a non-empty body becomes the initial text
pub async fn handler_with_body(
    State(state): State<ServiceState>,
    body: String,
) -> Result<impl IntoResponse, CreateError> {
    let text = (!body.is_empty()).then_some(body.as_str());
    create(&state, text).await
}

async fn create(state: &ServiceState, text: Option<&str>) -> Result<Json<CreateResponse>, CreateError> {
    let entity = Entity::create(text, state.database()).await?;

    let site_url = state.site_url();
    let public_link = Link::new(entity.id, entity.public_secret.into()).to_url(site_url)?;
    let private_link = Link::new(entity.id, entity.private_secret.into()).to_url(site_url)?;

    Ok(Json(CreateResponse {
        public_link,
        private_link,
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("entity error: {0}")]
    Entity(#[from] EntityError),
    #[error("failed to render link: {0}")]
    Link(#[from] LinkError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        tracing::error!("CREATE ERROR: {}", self);
        (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error",
        )
            .into_response()
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for CreateRequest {
    type Response = CreateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("create")?;
        Ok(match self.text {
            Some(text) => client.post(full_url).body(text),
            None => client.get(full_url),
        })
    }
}

#[async_trait::async_trait]
impl ApiResponse for CreateResponse {
    async fn from_response(response: reqwest::Response) -> Result<Self, ApiError> {
        Ok(response.json().await?)
    }
}
