//! "Selected item" cells.
//!
//! A list screen writes the tapped item just before navigating; the
//! detail screen reads it. Last write wins.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{AboutTopic, Institution};

/// Shared last-write-wins cell.
#[derive(Debug)]
pub struct SelectionCell<T> {
    value: Arc<RwLock<Option<T>>>,
}

impl<T: Clone> SelectionCell<T> {
    pub fn new() -> Self {
        Self {
            value: Arc::new(RwLock::new(None)),
        }
    }

    pub fn select(&self, item: T) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(item);
    }

    pub fn selected(&self) -> Option<T> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<T: Clone> Default for SelectionCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SelectionCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

/// The selection cells of the portal's feature areas.
#[derive(Debug, Clone, Default)]
pub struct PortalSelections {
    pub about_topic: SelectionCell<AboutTopic>,
    pub institution: SelectionCell<Institution>,
}

impl PortalSelections {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institution(id: &str) -> Institution {
        Institution {
            id: id.to_string(),
            name: format!("Faculty {}", id),
            description: String::new(),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let selections = PortalSelections::new();
        assert!(selections.institution.selected().is_none());

        selections.institution.select(institution("eng"));
        selections.institution.select(institution("law"));

        assert_eq!(selections.institution.selected().unwrap().id, "law");
    }

    #[test]
    fn test_clones_share_cell() {
        let cell: SelectionCell<AboutTopic> = SelectionCell::new();
        let reader = cell.clone();

        cell.select(AboutTopic {
            id: "history".to_string(),
            title: "History".to_string(),
            content: String::new(),
        });
        assert_eq!(reader.selected().map(|t| t.id), Some("history".to_string()));

        reader.clear();
        assert!(cell.selected().is_none());
    }
}
