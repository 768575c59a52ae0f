//! API health check

use crate::client::create_public_client;

/// Health check service backing the maintenance gate
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Whether the backend reports itself operational
    pub async fn is_operational(&self) -> Result<bool, String> {
        let client = create_public_client().map_err(|e| format!("Failed to get client: {e}"))?;
        Ok(client.health().await.is_ok())
    }
}
