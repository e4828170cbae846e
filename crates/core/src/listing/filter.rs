//! Filter criteria for the projects list.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// One of the foreign-key filters shown in the filters drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Status,
    Category,
    Priority,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [Self::Status, Self::Category, Self::Priority];

    /// Query-string parameter carrying this filter.
    pub fn param(self) -> &'static str {
        match self {
            Self::Status => "status_id",
            Self::Category => "category_id",
            Self::Priority => "priority_id",
        }
    }

    /// Accepts both the parameter name (`status_id`) and the bare field name (`status`).
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "status_id" | "status" => Some(Self::Status),
            "category_id" | "category" => Some(Self::Category),
            "priority_id" | "priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

/// Search text plus the three id filters. Empty text and `None` ids are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub name: String,
    pub status_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub priority_id: Option<DbId>,
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> Option<DbId> {
        match field {
            FilterField::Status => self.status_id,
            FilterField::Category => self.category_id,
            FilterField::Priority => self.priority_id,
        }
    }

    /// Set an id filter. Non-positive values clear it.
    pub fn set(&mut self, field: FilterField, value: i64) {
        let value = sanitize_id(value);
        match field {
            FilterField::Status => self.status_id = value,
            FilterField::Category => self.category_id = value,
            FilterField::Priority => self.priority_id = value,
        }
    }

    /// Number of filters differing from their empty value.
    pub fn active_count(&self) -> usize {
        let ids = FilterField::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count();
        ids + usize::from(!self.name.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// `0` (the "All" placeholder) and negative ids mean "no filter".
pub fn sanitize_id(value: i64) -> Option<DbId> {
    (value > 0).then_some(value)
}
