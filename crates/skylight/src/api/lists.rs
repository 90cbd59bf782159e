//! Shopping and to-do lists, and their items.
//!
//! List items are addressed by parent list id plus item id; they are not
//! reachable without their list.

use serde::Serialize;
use serde_json::Value;

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::resolve;
use crate::types::{Envelope, ItemStatus, List, ListItem, ListKind};

const LISTS_ENDPOINT: &str = "/api/frames/{frame_id}/lists";

/// A list with its side-loaded items and display sections.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub list: List,
    pub items: Vec<ListItem>,
    /// Display-grouping sections from response metadata, when present.
    pub sections: Option<Vec<Value>>,
}

/// Partial update for a list.
#[derive(Debug, Clone, Default)]
pub struct ListUpdate {
    pub label: Option<String>,
    pub list_kind: Option<ListKind>,
    /// `Some(None)` clears the color.
    pub color: Option<Option<String>>,
}

/// Partial update for a list item.
#[derive(Debug, Clone, Default)]
pub struct ListItemUpdate {
    pub label: Option<String>,
    pub status: Option<ItemStatus>,
    /// `Some(None)` removes the item from its section.
    pub section: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
struct ListWriteBody {
    data: ListWriteData,
}

#[derive(Debug, Serialize)]
struct ListWriteData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: ListWriteAttributes,
}

#[derive(Debug, Default, Serialize)]
struct ListWriteAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(rename = "kind", skip_serializing_if = "Option::is_none")]
    list_kind: Option<ListKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
struct ListItemWriteBody {
    data: ListItemWriteData,
}

#[derive(Debug, Serialize)]
struct ListItemWriteData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: ListItemWriteAttributes,
}

#[derive(Debug, Default, Serialize)]
struct ListItemWriteAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<Option<String>>,
}

impl SkylightClient {
    /// Get all lists.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn lists(&self) -> Result<Vec<List>, SkylightError> {
        let envelope: Envelope<Vec<List>> = self
            .get(LISTS_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("list"))?;
        Ok(envelope.data)
    }

    /// Get a specific list with its items side-loaded.
    ///
    /// # Errors
    /// Returns classified API errors; `NotFound` for an unknown list.
    pub async fn list_with_items(&self, list_id: &str) -> Result<ListPage, SkylightError> {
        let endpoint = format!("{LISTS_ENDPOINT}/{list_id}");
        let envelope: Envelope<List, ListItem> = self
            .get(&endpoint)
            .await
            .map_err(|e| e.for_kind("list"))?;

        let sections = envelope
            .meta
            .as_ref()
            .and_then(|meta| meta.get("sections"))
            .and_then(|v| v.as_array().cloned());

        Ok(ListPage {
            list: envelope.data,
            items: envelope.included,
            sections,
        })
    }

    /// Find a list by name (case-insensitive, exact before partial).
    ///
    /// # Errors
    /// Returns classified API errors; an unknown name is `Ok(None)`.
    pub async fn find_list(&self, name: &str) -> Result<Option<List>, SkylightError> {
        let lists = self.lists().await?;
        Ok(resolve::find_by_name(&lists, name).cloned())
    }

    /// Find "the" list of a kind. With `prefer_default`, the flagged default
    /// grocery list is authoritative for the shopping kind.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn find_list_by_kind(
        &self,
        kind: ListKind,
        prefer_default: bool,
    ) -> Result<Option<List>, SkylightError> {
        let lists = self.lists().await?;
        Ok(resolve::find_by_kind(&lists, kind, prefer_default).cloned())
    }

    /// Create a new list.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn create_list(
        &self,
        label: &str,
        kind: ListKind,
        color: Option<String>,
    ) -> Result<List, SkylightError> {
        let body = ListWriteBody {
            data: ListWriteData {
                kind: "list",
                attributes: ListWriteAttributes {
                    label: Some(label.to_string()),
                    list_kind: Some(kind),
                    color: Some(color),
                },
            },
        };
        let envelope: Envelope<List> = self
            .post(LISTS_ENDPOINT, &body)
            .await
            .map_err(|e| e.for_kind("list"))?;
        Ok(envelope.data)
    }

    /// Update a list; omitted fields are left unchanged.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn update_list(
        &self,
        list_id: &str,
        update: ListUpdate,
    ) -> Result<List, SkylightError> {
        let body = ListWriteBody {
            data: ListWriteData {
                kind: "list",
                attributes: ListWriteAttributes {
                    label: update.label,
                    list_kind: update.list_kind,
                    color: update.color,
                },
            },
        };
        let endpoint = format!("{LISTS_ENDPOINT}/{list_id}");
        let envelope: Envelope<List> = self
            .put(&endpoint, &body)
            .await
            .map_err(|e| e.for_kind("list"))?;
        Ok(envelope.data)
    }

    /// Delete a list.
    ///
    /// # Errors
    /// Returns classified API errors; a second delete surfaces `NotFound`.
    pub async fn delete_list(&self, list_id: &str) -> Result<(), SkylightError> {
        let endpoint = format!("{LISTS_ENDPOINT}/{list_id}");
        self.delete(&endpoint).await.map_err(|e| e.for_kind("list"))
    }

    /// Add an item to a list, optionally under a display section.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn add_list_item(
        &self,
        list_id: &str,
        label: &str,
        section: Option<String>,
    ) -> Result<ListItem, SkylightError> {
        let body = ListItemWriteBody {
            data: ListItemWriteData {
                kind: "list_item",
                attributes: ListItemWriteAttributes {
                    label: Some(label.to_string()),
                    status: None,
                    section: Some(section),
                },
            },
        };
        let endpoint = format!("{LISTS_ENDPOINT}/{list_id}/list_items");
        let envelope: Envelope<ListItem> = self
            .post(&endpoint, &body)
            .await
            .map_err(|e| e.for_kind("list item"))?;
        Ok(envelope.data)
    }

    /// Update a list item; omitted fields are left unchanged.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn update_list_item(
        &self,
        list_id: &str,
        item_id: &str,
        update: ListItemUpdate,
    ) -> Result<ListItem, SkylightError> {
        let body = ListItemWriteBody {
            data: ListItemWriteData {
                kind: "list_item",
                attributes: ListItemWriteAttributes {
                    label: update.label,
                    status: update.status,
                    section: update.section,
                },
            },
        };
        let endpoint = format!("{LISTS_ENDPOINT}/{list_id}/list_items/{item_id}");
        let envelope: Envelope<ListItem> = self
            .put(&endpoint, &body)
            .await
            .map_err(|e| e.for_kind("list item"))?;
        Ok(envelope.data)
    }

    /// Delete a list item. Deleting one that is already gone surfaces
    /// `NotFound`, never a silent success.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn delete_list_item(
        &self,
        list_id: &str,
        item_id: &str,
    ) -> Result<(), SkylightError> {
        let endpoint = format!("{LISTS_ENDPOINT}/{list_id}/list_items/{item_id}");
        self.delete(&endpoint)
            .await
            .map_err(|e| e.for_kind("list item"))
    }
}
