//! No-op settlement client.

use crate::domain::SettlementError;
use crate::ports::outbound::{MetadataRegistration, SettlementClient};
use async_trait::async_trait;
use tracing::debug;

/// Accepts every registration without contacting anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSettlementClient;

#[async_trait]
impl SettlementClient for NoopSettlementClient {
    async fn register_metadata(
        &self,
        registration: &MetadataRegistration,
    ) -> Result<(), SettlementError> {
        debug!(denom = %registration.denom, "Skipping metadata registration");
        Ok(())
    }
}
