use std::sync::Arc;

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::ServiceState;

/// Something the readiness probe can ask whether the service can take traffic
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    async fn is_ready(&self) -> Result<(), DataSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("one or more dependencies aren't available")]
    DependencyFailure,
    #[allow(dead_code)]
    #[error("service is shutting down")]
    ShuttingDown,
}

#[async_trait::async_trait]
impl DataSource for ServiceState {
    async fn is_ready(&self) -> Result<(), DataSourceError> {
        self.database().is_ready().await.map_err(|e| {
            tracing::error!("database readiness check failed: {}", e);
            DataSourceError::DependencyFailure
        })
    }
}

#[derive(Clone)]
pub struct StateDataSource(Arc<dyn DataSource>);

impl StateDataSource {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self(source)
    }

    pub async fn is_ready(&self) -> Result<(), DataSourceError> {
        self.0.is_ready().await
    }
}

impl std::fmt::Debug for StateDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDataSource").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl FromRequestParts<ServiceState> for StateDataSource {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::new(Arc::new(state.clone())))
    }
}
