//! Response models for the Skylight API (JSON:API format).
//!
//! Every backend entity follows the resource-envelope pattern:
//! `{ type, id, attributes, relationships? }`, wrapped in a response
//! envelope `{ data, included?, meta? }`. Related resources arrive
//! side-loaded in `included` and are joined by `(type, id)`, never by
//! array position.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response envelope wrapping primary data and side-loaded resources.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<D, I = Value> {
    pub data: D,
    #[serde(default)]
    pub included: Vec<I>,
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

// A 304 Not Modified yields an empty-but-successful envelope.
impl<D: Default, I> Default for Envelope<D, I> {
    fn default() -> Self {
        Self {
            data: D::default(),
            included: Vec::new(),
            meta: None,
        }
    }
}

/// Reference to a resource by identity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceRef {
    pub fn category(id: impl Into<String>) -> Self {
        Self {
            kind: "category".into(),
            id: id.into(),
        }
    }
}

/// Single, nullable relationship. Serializing `data: None` produces an
/// explicit `null`, which clears the assignment on the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    pub data: Option<ResourceRef>,
}

/// Ordered to-many relationship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManyRelationship {
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

// ============================================================================
// Category (family member / profile)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: CategoryAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryAttributes {
    pub label: Option<String>,
    pub color: Option<String>,
    pub selected_for_chore_chart: Option<bool>,
    pub linked_to_profile: Option<bool>,
    pub profile_pic_url: Option<String>,
}

// ============================================================================
// Chore
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chore {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    pub attributes: ChoreAttributes,
    #[serde(default)]
    pub relationships: Option<ChoreRelationships>,
}

impl Chore {
    /// Id of the assigned category, if any.
    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()?
            .category
            .as_ref()?
            .data
            .as_ref()
            .map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoreAttributes {
    pub summary: String,
    #[serde(default)]
    pub status: String,
    /// Due date, `YYYY-MM-DD`.
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
    #[serde(default)]
    pub is_future: Option<bool>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub recurring_until: Option<String>,
    #[serde(default)]
    pub recurrence_set: Option<String>,
    #[serde(default)]
    pub reward_points: Option<i64>,
    #[serde(default)]
    pub emoji_icon: Option<String>,
    #[serde(default)]
    pub routine: Option<bool>,
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoreRelationships {
    #[serde(default)]
    pub category: Option<Relationship>,
}

// ============================================================================
// List / ListItem
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    #[default]
    Shopping,
    ToDo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct List {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    pub attributes: ListAttributes,
    #[serde(default)]
    pub relationships: Option<ListRelationships>,
}

impl List {
    /// Number of items the backend reports for this list.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.relationships
            .as_ref()
            .and_then(|r| r.list_items.as_ref())
            .map_or(0, |r| r.data.len())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAttributes {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "kind")]
    pub list_kind: ListKind,
    #[serde(default)]
    pub default_grocery_list: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRelationships {
    #[serde(default)]
    pub list_items: Option<ManyRelationship>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    pub attributes: ListItemAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemAttributes {
    pub label: String,
    #[serde(default)]
    pub status: ItemStatus,
    /// Display-grouping section label, e.g. "Produce".
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ============================================================================
// Task box
// ============================================================================

/// Unscheduled chore-like entity; a holding area before scheduling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskBoxItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    pub attributes: TaskBoxItemAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskBoxItemAttributes {
    pub summary: String,
    #[serde(default)]
    pub emoji_icon: Option<String>,
    #[serde(default)]
    pub routine: Option<bool>,
    #[serde(default)]
    pub reward_points: Option<i64>,
}

// ============================================================================
// Loosely-typed resources
// ============================================================================

/// Resource whose attribute set the backend does not commit to (rewards,
/// frames, calendar events, devices, avatars, colors, albums).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LooseResource {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

pub type Reward = LooseResource;
pub type RewardPoint = LooseResource;
pub type Frame = LooseResource;
pub type CalendarEvent = LooseResource;
pub type SourceCalendar = LooseResource;
pub type Device = LooseResource;
pub type Avatar = LooseResource;
pub type Color = LooseResource;
pub type Album = LooseResource;

/// Render a loose attribute map for display, sorted by key so output does
/// not depend on backend-controlled field ordering. Nulls are skipped.
#[must_use]
pub fn display_attributes(attributes: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = attributes.keys().collect();
    keys.sort();

    let mut lines = Vec::new();
    for key in keys {
        let value = &attributes[key.as_str()];
        if value.is_null() {
            continue;
        }
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("  {key}: {rendered}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chore_envelope_deserialization() {
        let json = r#"{
            "data": [{
                "type": "chore",
                "id": "42",
                "attributes": {
                    "summary": "Empty the dishwasher",
                    "status": "pending",
                    "start": "2024-03-15",
                    "start_time": "10:00",
                    "recurring": true,
                    "recurrence_set": "RRULE:FREQ=WEEKLY",
                    "reward_points": 5
                },
                "relationships": {
                    "category": { "data": { "type": "category", "id": "7" } }
                }
            }],
            "included": [{
                "type": "category",
                "id": "7",
                "attributes": { "label": "Dad", "linked_to_profile": true }
            }]
        }"#;

        let envelope: Envelope<Vec<Chore>, Category> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        let chore = &envelope.data[0];
        assert_eq!(chore.attributes.summary, "Empty the dishwasher");
        assert_eq!(chore.category_id(), Some("7"));
        assert_eq!(envelope.included[0].attributes.label.as_deref(), Some("Dad"));
    }

    #[test]
    fn test_envelope_without_included_defaults_empty() {
        let json = r#"{ "data": [] }"#;
        let envelope: Envelope<Vec<Category>> = serde_json::from_str(json).unwrap();
        assert!(envelope.included.is_empty());
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_list_kind_round_trip() {
        let json = r#"{
            "type": "list",
            "id": "3",
            "attributes": { "label": "Groceries", "kind": "shopping", "default_grocery_list": true },
            "relationships": { "list_items": { "data": [
                { "type": "list_item", "id": "1" },
                { "type": "list_item", "id": "2" }
            ] } }
        }"#;
        let list: List = serde_json::from_str(json).unwrap();
        assert_eq!(list.attributes.list_kind, ListKind::Shopping);
        assert!(list.attributes.default_grocery_list);
        assert_eq!(list.item_count(), 2);

        assert_eq!(serde_json::to_value(ListKind::ToDo).unwrap(), json!("to_do"));
    }

    #[test]
    fn test_relationship_null_serializes_explicitly() {
        let cleared = Relationship { data: None };
        assert_eq!(
            serde_json::to_value(&cleared).unwrap(),
            json!({ "data": null })
        );
    }

    #[test]
    fn test_display_attributes_sorted_and_null_free() {
        let attributes = json!({
            "zeta": "last",
            "alpha": 1,
            "skipped": null,
            "beta": true
        });
        let Value::Object(map) = attributes else {
            unreachable!()
        };
        let rendered = display_attributes(&map);
        assert_eq!(rendered, "  alpha: 1\n  beta: true\n  zeta: last");
    }
}
