use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: &'static str,
}

impl HealthResponse {
    /// The backing store is installed and answering.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    /// The service is up but running without a storage backend.
    pub fn degraded() -> Self {
        Self { status: "degraded" }
    }
}
