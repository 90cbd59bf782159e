//! Categories: family members / profiles.

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::resolve;
use crate::types::{Category, Envelope};

const CATEGORIES_ENDPOINT: &str = "/api/frames/{frame_id}/categories";

impl SkylightClient {
    /// Get all categories (family members/profiles).
    ///
    /// With `use_cache`, repeated lookups within a session reuse the last
    /// listing until [`invalidate_category_cache`](Self::invalidate_category_cache)
    /// is called. There is no TTL; the backend stays the source of truth for
    /// fresh reads.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn categories(&self, use_cache: bool) -> Result<Vec<Category>, SkylightError> {
        if use_cache {
            if let Some(cached) = self.categories_cache.lock().await.clone() {
                return Ok(cached);
            }
        }

        let envelope: Envelope<Vec<Category>> = self
            .get(CATEGORIES_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("category"))?;

        *self.categories_cache.lock().await = Some(envelope.data.clone());
        Ok(envelope.data)
    }

    /// Drop the cached category listing. Snapshots already returned keep
    /// their data; in-flight reads are unaffected.
    pub async fn invalidate_category_cache(&self) {
        *self.categories_cache.lock().await = None;
    }

    /// Find a category by name (case-insensitive, exact before partial).
    ///
    /// # Errors
    /// Returns classified API errors; an unknown name is `Ok(None)`, a
    /// user-correctable condition rather than a fault.
    pub async fn find_category(&self, name: &str) -> Result<Option<Category>, SkylightError> {
        let categories = self.categories(true).await?;
        Ok(resolve::find_by_name(&categories, name).cloned())
    }

    /// Categories linked to profiles: the actual family members.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn family_members(&self) -> Result<Vec<Category>, SkylightError> {
        let categories = self.categories(true).await?;
        Ok(categories
            .into_iter()
            .filter(|c| c.attributes.linked_to_profile == Some(true))
            .collect())
    }

    /// Categories selected for the chore chart.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn chore_chart_categories(&self) -> Result<Vec<Category>, SkylightError> {
        let categories = self.categories(true).await?;
        Ok(categories
            .into_iter()
            .filter(|c| c.attributes.selected_for_chore_chart == Some(true))
            .collect())
    }
}
