use axum::extract::{Path, State};
use axum::http::StatusCode;
use reqwest::{Client, RequestBuilder, Url};

use common::prelude::LinkError;

use crate::database::models::Entity;
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::http_server::api::{parse_link, EntityRouteError, MIME_SEGMENT};
use crate::ServiceState;

#[derive(Debug, Clone)]
pub struct MimeRequest {
    /// Private link of the entity
    pub link: Url,
    /// New content type, e.g. `text/plain`
    pub content_type: String,
}

/// `POST /{private link}/mime`: the body becomes the content type
pub async fn handler(
    State(state): State<ServiceState>,
    Path((link, segment)): Path<(String, String)>,
    body: String,
) -> Result<StatusCode, EntityRouteError> {
    if segment != MIME_SEGMENT {
        return Err(EntityRouteError::NotFound);
    }

    let (id, secret) = parse_link(&link)?.into_parts();
    Entity::set_content_type(id, &secret, &body, state.database()).await?;
    Ok(StatusCode::OK)
}

impl ApiRequest for MimeRequest {
    type Response = ();

    fn build_request(self, _base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let mut url = self.link;
        url.path_segments_mut()
            .map_err(|_| ApiError::Link(LinkError::CannotBeABase))?
            .pop_if_empty()
            .push(MIME_SEGMENT);
        Ok(client.post(url).body(self.content_type))
    }
}
