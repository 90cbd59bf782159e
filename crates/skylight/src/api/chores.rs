//! Chores: scheduled household tasks with optional assignee and points.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::client::SkylightClient;
use crate::dates::canonical_time;
use crate::error::SkylightError;
use crate::types::{Category, Chore, Envelope, Relationship, ResourceRef};

const CHORES_ENDPOINT: &str = "/api/frames/{frame_id}/chores";

/// Filters for a chore listing.
#[derive(Debug, Clone, Default)]
pub struct ChoreQuery {
    /// Only chores on or after this date.
    pub after: Option<NaiveDate>,
    /// Only chores on or before this date.
    pub before: Option<NaiveDate>,
    /// Include overdue chores from past dates.
    pub include_late: Option<bool>,
    /// Restrict to chores assigned to profile-linked categories.
    pub linked_to_profile: bool,
}

/// A chore listing with its side-loaded assignee categories, joined by id.
#[derive(Debug, Clone)]
pub struct ChorePage {
    pub chores: Vec<Chore>,
    pub categories: Vec<Category>,
}

impl ChorePage {
    /// Label of the category a chore is assigned to, if any.
    #[must_use]
    pub fn assignee_label(&self, chore: &Chore) -> Option<&str> {
        let category_id = chore.category_id()?;
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .and_then(|c| c.attributes.label.as_deref())
    }
}

/// Fields for a new chore. Only `summary` and `start` are required.
#[derive(Debug, Clone, Default)]
pub struct NewChore {
    pub summary: String,
    pub start: NaiveDate,
    pub start_time: Option<NaiveTime>,
    /// Defaults to "pending".
    pub status: Option<String>,
    pub recurring: bool,
    /// RRULE string, e.g. `RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR`.
    pub recurrence_set: Option<String>,
    pub reward_points: Option<i64>,
    pub emoji_icon: Option<String>,
    /// Category (family member) to assign.
    pub category_id: Option<String>,
}

/// Partial update for a chore.
///
/// Outer `None` means "leave unchanged"; for nullable fields, `Some(None)`
/// means "clear this field" — the two are serialized distinguishably.
#[derive(Debug, Clone, Default)]
pub struct ChoreUpdate {
    pub summary: Option<String>,
    pub status: Option<String>,
    pub start: Option<NaiveDate>,
    pub start_time: Option<Option<NaiveTime>>,
    pub recurring: Option<bool>,
    pub recurrence_set: Option<Option<String>>,
    pub reward_points: Option<Option<i64>>,
    pub emoji_icon: Option<Option<String>>,
    /// `Some(None)` clears the assignment; `Some(Some(id))` reassigns.
    pub category_id: Option<Option<String>>,
}

// Wire shapes. Absent fields are omitted entirely; `Some(None)` inner
// options serialize as explicit `null`.

#[derive(Debug, Serialize)]
struct ChoreWriteBody {
    data: ChoreWriteData,
}

#[derive(Debug, Serialize)]
struct ChoreWriteData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: ChoreWriteAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationships: Option<ChoreWriteRelationships>,
}

#[derive(Debug, Default, Serialize)]
struct ChoreWriteAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence_set: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reward_points: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji_icon: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
struct ChoreWriteRelationships {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Relationship>,
}

impl SkylightClient {
    /// Get chores for a date range, with their assignee categories
    /// side-loaded.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn chores(&self, query: &ChoreQuery) -> Result<ChorePage, SkylightError> {
        let mut params = Vec::new();
        if let Some(after) = query.after {
            params.push(("after".to_string(), after.to_string()));
        }
        if let Some(before) = query.before {
            params.push(("before".to_string(), before.to_string()));
        }
        if let Some(include_late) = query.include_late {
            params.push(("include_late".to_string(), include_late.to_string()));
        }
        if query.linked_to_profile {
            params.push(("filter".to_string(), "linked_to_profile".to_string()));
        }

        let envelope: Envelope<Vec<Chore>, Category> = self
            .get_with_query(CHORES_ENDPOINT, &params)
            .await
            .map_err(|e| e.for_kind("chore"))?;

        Ok(ChorePage {
            chores: envelope.data,
            categories: envelope.included,
        })
    }

    /// Create a new chore.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn create_chore(&self, new: NewChore) -> Result<Chore, SkylightError> {
        let relationships = new.category_id.map(|id| ChoreWriteRelationships {
            category: Some(Relationship {
                data: Some(ResourceRef::category(id)),
            }),
        });

        let body = ChoreWriteBody {
            data: ChoreWriteData {
                kind: "chore",
                attributes: ChoreWriteAttributes {
                    summary: Some(new.summary),
                    status: Some(new.status.unwrap_or_else(|| "pending".to_string())),
                    start: Some(new.start.to_string()),
                    start_time: Some(new.start_time.map(canonical_time)),
                    recurring: Some(new.recurring),
                    recurrence_set: Some(new.recurrence_set),
                    reward_points: Some(new.reward_points),
                    emoji_icon: Some(new.emoji_icon),
                },
                relationships,
            },
        };

        let envelope: Envelope<Chore, Category> = self
            .post(CHORES_ENDPOINT, &body)
            .await
            .map_err(|e| e.for_kind("chore"))?;
        Ok(envelope.data)
    }

    /// Update a chore. Omitted fields are left unchanged; explicitly null
    /// fields are cleared, including the category assignment.
    ///
    /// # Errors
    /// Returns classified API errors; `NotFound` if the chore is gone.
    pub async fn update_chore(
        &self,
        chore_id: &str,
        update: ChoreUpdate,
    ) -> Result<Chore, SkylightError> {
        let relationships = update.category_id.map(|category| ChoreWriteRelationships {
            category: Some(Relationship {
                data: category.map(ResourceRef::category),
            }),
        });

        let body = ChoreWriteBody {
            data: ChoreWriteData {
                kind: "chore",
                attributes: ChoreWriteAttributes {
                    summary: update.summary,
                    status: update.status,
                    start: update.start.map(|d| d.to_string()),
                    start_time: update.start_time.map(|t| t.map(canonical_time)),
                    recurring: update.recurring,
                    recurrence_set: update.recurrence_set,
                    reward_points: update.reward_points,
                    emoji_icon: update.emoji_icon,
                },
                relationships,
            },
        };

        let endpoint = format!("{CHORES_ENDPOINT}/{chore_id}");
        let envelope: Envelope<Chore, Category> = self
            .put(&endpoint, &body)
            .await
            .map_err(|e| e.for_kind("chore"))?;
        Ok(envelope.data)
    }

    /// Delete a chore. Deleting one that is already gone surfaces
    /// `NotFound`, never a silent success.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn delete_chore(&self, chore_id: &str) -> Result<(), SkylightError> {
        let endpoint = format!("{CHORES_ENDPOINT}/{chore_id}");
        self.delete(&endpoint).await.map_err(|e| e.for_kind("chore"))
    }
}
