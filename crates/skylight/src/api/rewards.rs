//! Rewards and per-member point balances.

use reqwest::Method;

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::types::{Envelope, Reward, RewardPoint};

const REWARDS_ENDPOINT: &str = "/api/frames/{frame_id}/rewards";
const REWARD_POINTS_ENDPOINT: &str = "/api/frames/{frame_id}/reward_points";

impl SkylightClient {
    /// Get rewards redeemable with points. `redeemed_at_min` (ISO datetime)
    /// filters to rewards redeemed after that instant.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn rewards(
        &self,
        redeemed_at_min: Option<&str>,
    ) -> Result<Vec<Reward>, SkylightError> {
        let mut params = Vec::new();
        if let Some(min) = redeemed_at_min {
            params.push(("redeemed_at_min".to_string(), min.to_string()));
        }
        let envelope: Envelope<Vec<Reward>> = self
            .get_with_query(REWARDS_ENDPOINT, &params)
            .await
            .map_err(|e| e.for_kind("reward"))?;
        Ok(envelope.data)
    }

    /// Get reward point balances per family member.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn reward_points(&self) -> Result<Vec<RewardPoint>, SkylightError> {
        let envelope: Envelope<Vec<RewardPoint>> = self
            .get(REWARD_POINTS_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("reward points"))?;
        Ok(envelope.data)
    }

    /// Redeem a reward: an explicit state transition, not an attribute edit.
    ///
    /// # Errors
    /// Returns classified API errors; `NotFound` for an unknown reward.
    pub async fn redeem_reward(&self, reward_id: &str) -> Result<(), SkylightError> {
        let endpoint = format!("{REWARDS_ENDPOINT}/{reward_id}/redeem");
        self.request_no_content::<()>(Method::POST, &endpoint, None)
            .await
            .map_err(|e| e.for_kind("reward"))
    }

    /// Undo a redemption.
    ///
    /// # Errors
    /// Returns classified API errors; `NotFound` for an unknown reward.
    pub async fn unredeem_reward(&self, reward_id: &str) -> Result<(), SkylightError> {
        let endpoint = format!("{REWARDS_ENDPOINT}/{reward_id}/unredeem");
        self.request_no_content::<()>(Method::POST, &endpoint, None)
            .await
            .map_err(|e| e.for_kind("reward"))
    }
}
