//! Static column definitions for list tables.

use serde::Serialize;

use super::sort::SortColumn;

/// One table column. `sort_by` replaces `key` as the sort key for columns
/// whose display value comes from a joined relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub sort_by: Option<&'static str>,
    pub class: Option<&'static str>,
}

impl HeaderDescriptor {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
            sort_by: None,
            class: None,
        }
    }

    pub const fn sort_by(mut self, key: &'static str) -> Self {
        self.sort_by = Some(key);
        self
    }

    pub const fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn sort_key(&self) -> &'static str {
        self.sort_by.unwrap_or(self.key)
    }

    /// The sort column this header toggles, if it is sortable.
    pub fn sort_column(&self) -> Option<SortColumn> {
        if self.sortable {
            SortColumn::from_key(self.sort_key())
        } else {
            None
        }
    }
}

const WIDE_ONLY: &str = "hidden lg:table-cell";

pub const PROJECT_HEADERS: &[HeaderDescriptor] = &[
    HeaderDescriptor::new("id", "No"),
    HeaderDescriptor::new("name", "Name"),
    HeaderDescriptor::new("status.name", "Status")
        .sort_by("status_name")
        .class(WIDE_ONLY),
    HeaderDescriptor::new("category.name", "Category")
        .sort_by("category_name")
        .class(WIDE_ONLY),
    HeaderDescriptor::new("priority.name", "Priority").sort_by("priority_name"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sortable_header_maps_to_a_sort_column() {
        for header in PROJECT_HEADERS.iter().filter(|h| h.sortable) {
            assert!(
                header.sort_column().is_some(),
                "header {} has no sort column",
                header.key
            );
        }
    }

    #[test]
    fn aggregate_columns_sort_by_override() {
        let status = PROJECT_HEADERS
            .iter()
            .find(|h| h.key == "status.name")
            .unwrap();
        assert_eq!(status.sort_key(), "status_name");
        assert_eq!(status.sort_column(), Some(SortColumn::StatusName));
        assert_eq!(status.class, Some("hidden lg:table-cell"));
    }

    #[test]
    fn plain_columns_sort_by_key() {
        assert_eq!(PROJECT_HEADERS[0].sort_column(), Some(SortColumn::Id));
        assert_eq!(PROJECT_HEADERS[1].sort_column(), Some(SortColumn::Name));
    }
}
