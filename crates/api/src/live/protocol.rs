//! JSON messages exchanged with the live list page.

use serde::{Deserialize, Serialize};

use crate::views::FilterView;

/// A user interaction, tagged by `action`.
///
/// ```json
/// {"action": "set_filter", "field": "status_id", "value": 2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientEvent {
    SetName { value: String },
    SetFilter { field: String, value: i64 },
    SetSort { column: String },
    SetPage { page: i64 },
    ClearFilters,
    ToggleFilters { open: bool },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// The table for the current state.
    Render {
        url: String,
        html: String,
        filters: FilterView,
        active_filter_count: usize,
        total_count: i64,
        page: i64,
    },
    /// Open or close the filters drawer.
    Drawer { open: bool },
    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
