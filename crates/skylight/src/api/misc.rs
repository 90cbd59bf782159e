//! Avatars, colors, and photo albums.
//!
//! Avatars and colors are account-level option catalogs, not scoped to a
//! frame.

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::types::{Album, Avatar, Color, Envelope};

const AVATARS_ENDPOINT: &str = "/api/avatars";
const COLORS_ENDPOINT: &str = "/api/colors";
const ALBUMS_ENDPOINT: &str = "/api/frames/{frame_id}/albums";

impl SkylightClient {
    /// Get available avatar options.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn avatars(&self) -> Result<Vec<Avatar>, SkylightError> {
        let envelope: Envelope<Vec<Avatar>> = self
            .get(AVATARS_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("avatar"))?;
        Ok(envelope.data)
    }

    /// Get available color options.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn colors(&self) -> Result<Vec<Color>, SkylightError> {
        let envelope: Envelope<Vec<Color>> = self
            .get(COLORS_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("color"))?;
        Ok(envelope.data)
    }

    /// Get photo albums.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn albums(&self) -> Result<Vec<Album>, SkylightError> {
        let envelope: Envelope<Vec<Album>> = self
            .get(ALBUMS_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("album"))?;
        Ok(envelope.data)
    }
}
