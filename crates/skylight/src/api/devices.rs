//! Skylight devices in the household.

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::types::{Device, Envelope};

const DEVICES_ENDPOINT: &str = "/api/frames/{frame_id}/devices";

impl SkylightClient {
    /// Get all devices in the household.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn devices(&self) -> Result<Vec<Device>, SkylightError> {
        let envelope: Envelope<Vec<Device>> = self
            .get(DEVICES_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("device"))?;
        Ok(envelope.data)
    }
}
