//! Frame (household) information.

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::types::{Envelope, Frame};

const FRAME_ENDPOINT: &str = "/api/frames/{frame_id}";

impl SkylightClient {
    /// Get the configured frame's details.
    ///
    /// # Errors
    /// Returns classified API errors; `NotFound` if the frame id is wrong.
    pub async fn frame(&self) -> Result<Frame, SkylightError> {
        let envelope: Envelope<Frame> = self
            .get(FRAME_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("frame"))?;
        Ok(envelope.data)
    }
}
