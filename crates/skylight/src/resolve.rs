//! Fuzzy resolution of human-provided names to backend resources.

use crate::types::{Category, List, ListKind};

/// Resources addressable by a human-readable label.
pub trait Labeled {
    fn label(&self) -> Option<&str>;
}

impl Labeled for Category {
    fn label(&self) -> Option<&str> {
        self.attributes.label.as_deref()
    }
}

impl Labeled for List {
    fn label(&self) -> Option<&str> {
        Some(&self.attributes.label)
    }
}

/// Find a resource by name, case-insensitively.
///
/// An exact label match anywhere in the collection wins over substring
/// containment; within each class, listing order (the order returned by the
/// backend) breaks ties. So "dad" resolves to "Dad" even when "Daddy's
/// Helper" appears first.
pub fn find_by_name<'a, T: Labeled>(items: &'a [T], name: &str) -> Option<&'a T> {
    let needle = name.to_lowercase();
    let mut containment = None;

    for item in items {
        let Some(label) = item.label() else {
            continue;
        };
        let label = label.to_lowercase();
        if label == needle {
            return Some(item);
        }
        if containment.is_none() && label.contains(&needle) {
            containment = Some(item);
        }
    }

    containment
}

/// Find a list by kind. When `prefer_default` is set and the kind is
/// shopping, the list flagged `default_grocery_list` wins; otherwise the
/// first list of that kind in listing order.
pub fn find_by_kind(lists: &[List], kind: ListKind, prefer_default: bool) -> Option<&List> {
    if prefer_default && kind == ListKind::Shopping {
        let default = lists
            .iter()
            .find(|l| l.attributes.list_kind == kind && l.attributes.default_grocery_list);
        if default.is_some() {
            return default;
        }
    }

    lists.iter().find(|l| l.attributes.list_kind == kind)
}
