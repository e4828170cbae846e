//! Lookup rows (statuses, categories, priorities, departments).

use serde::Serialize;
use sqlx::FromRow;
use tabula_core::types::DbId;

/// One selectable option, e.g. a status.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LookupOption {
    pub id: DbId,
    pub name: String,
}

/// The lookup tables. Only these names are ever interpolated into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    Statuses,
    Categories,
    Priorities,
    Departments,
}

impl LookupTable {
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Statuses => "statuses",
            Self::Categories => "categories",
            Self::Priorities => "priorities",
            Self::Departments => "departments",
        }
    }
}

/// Ids of the given options, for `in` validation rules.
pub fn option_ids(options: &[LookupOption]) -> Vec<DbId> {
    options.iter().map(|o| o.id).collect()
}
