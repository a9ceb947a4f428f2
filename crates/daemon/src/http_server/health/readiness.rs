use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::time::timeout;

use super::data_source::*;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// `GET /_status/readyz`: 200 once the database answers, 503 otherwise
#[tracing::instrument]
pub async fn handler(data_src: StateDataSource) -> Response {
    let failure = match timeout(HEALTH_CHECK_TIMEOUT, data_src.is_ready()).await {
        Ok(Ok(())) => {
            let msg = serde_json::json!({"status": "ok"});
            return (StatusCode::OK, Json(msg)).into_response();
        }
        Ok(Err(e)) => e.to_string(),
        Err(_) => "health check timed out".to_string(),
    };

    tracing::warn!(reason = %failure, "readiness check failed");
    let msg = serde_json::json!({"status": "failure", "message": failure});
    (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    use crate::http_server::health::data_source::tests::*;

    #[tokio::test]
    async fn test_handler_direct() {
        let response = handler(StateDataSource::new(Arc::new(MockReadiness::Ready))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = handler(StateDataSource::new(Arc::new(
            MockReadiness::DependencyFailure,
        )))
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = handler(StateDataSource::new(Arc::new(MockReadiness::ShuttingDown))).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_handler_against_database() {
        let db_url = url::Url::parse("sqlite::memory:").unwrap();
        let database = crate::Database::connect(&db_url).await.unwrap();
        let state = crate::ServiceState::new(
            database,
            url::Url::parse("http://localhost:8080").unwrap(),
        );

        let response = handler(StateDataSource::new(Arc::new(state))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
