use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

use common::prelude::{Link, LinkError};

use crate::database::models::EntityError;
use crate::ServiceState;

pub mod append;
pub mod client;
pub mod create;
pub mod fetch;
pub mod mime;
pub mod update;

/// Second path segment that turns a POST into a content type change
const MIME_SEGMENT: &str = "mime";

pub fn router(state: ServiceState) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
        ])
        .allow_headers(vec![ACCEPT, CONTENT_TYPE, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .route("/create", get(create::handler).post(create::handler_with_body))
        .route(
            "/:link",
            get(fetch::handler)
                .put(update::handler)
                .patch(append::handler),
        )
        .route(
            "/:link/:segment",
            get(update::path_handler).post(mime::handler),
        )
        .with_state(state)
        .layer(cors_layer)
}

/// Decode the `{id}!{secret}` path segment of a request
pub(crate) fn parse_link(segment: &str) -> Result<Link, EntityRouteError> {
    segment.parse::<Link>().map_err(|e| {
        tracing::debug!("rejecting malformed link: {}", e);
        EntityRouteError::Link(e)
    })
}

/// Failure of any route addressed by a link
///
/// Malformed links, unknown ids and wrong secrets all answer the same
/// 404 so that a response never confirms an entity exists.
#[derive(Debug, thiserror::Error)]
pub enum EntityRouteError {
    #[error("malformed link: {0}")]
    Link(#[from] LinkError),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Entity(#[from] EntityError),
    #[error("stored content type is not a valid header value")]
    InvalidStoredContentType,
}

impl IntoResponse for EntityRouteError {
    fn into_response(self) -> Response {
        match self {
            EntityRouteError::Link(_)
            | EntityRouteError::NotFound
            | EntityRouteError::Entity(EntityError::NotFound) => {
                (StatusCode::NOT_FOUND, "not found").into_response()
            }
            EntityRouteError::Entity(EntityError::InvalidContentType(reason)) => (
                StatusCode::BAD_REQUEST,
                format!("invalid content type: {}", reason),
            )
                .into_response(),
            EntityRouteError::Entity(e) => {
                tracing::error!("entity route failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            EntityRouteError::InvalidStoredContentType => {
                tracing::error!("stored content type is not a valid header value");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            EntityRouteError::Link(LinkError::MissingDelimiter)
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EntityRouteError::Entity(EntityError::NotFound)
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EntityRouteError::Entity(EntityError::InvalidContentType("empty"))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EntityRouteError::Entity(EntityError::SecretCollision(5))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parse_link() {
        assert!(parse_link("1!Pabc").is_ok());
        assert!(matches!(
            parse_link("nodelimiter"),
            Err(EntityRouteError::Link(LinkError::MissingDelimiter))
        ));
    }
}
