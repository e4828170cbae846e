//! The list component's state and its transitions.
//!
//! Every transition is total: bad input is sanitized, never rejected. Any
//! change to the filters or the sort sends the cursor back to page 1 so a
//! page number computed against an older result set is never reused.

use serde::Serialize;

use super::filter::{FilterField, FilterState};
use super::page::{clamp_page, PAGE_SIZE};
use super::sort::{SortColumn, SortState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListState {
    pub filters: FilterState,
    pub sort: SortState,
    pub page: i64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            sort: SortState::default(),
            page: 1,
        }
    }
}

impl ListState {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.filters.name = name.into();
        self.page = 1;
    }

    /// `value <= 0` clears the filter.
    pub fn set_filter(&mut self, field: FilterField, value: i64) {
        self.filters.set(field, value);
        self.page = 1;
    }

    /// Toggle or switch the sort column by key. Unknown keys leave the
    /// sort untouched but still reset the page.
    pub fn set_sort(&mut self, key: &str) {
        if let Some(column) = SortColumn::from_key(key) {
            self.sort.toggle_or_set(column);
        }
        self.page = 1;
    }

    pub fn set_sort_column(&mut self, column: SortColumn) {
        self.sort.toggle_or_set(column);
        self.page = 1;
    }

    /// Move to `page`, clamped against the current result count.
    pub fn set_page(&mut self, page: i64, total_count: i64) {
        self.page = clamp_page(page, total_count, PAGE_SIZE);
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.page = 1;
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    // -- Derived states for link targets ------------------------------------

    pub fn with_sort(&self, column: SortColumn) -> Self {
        let mut next = self.clone();
        next.set_sort_column(column);
        next
    }

    pub fn with_page(&self, page: i64, total_count: i64) -> Self {
        let mut next = self.clone();
        next.set_page(page, total_count);
        next
    }

    pub fn cleared(&self) -> Self {
        let mut next = self.clone();
        next.clear_filters();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::sort::SortDirection;

    fn on_page(page: i64) -> ListState {
        ListState {
            page,
            ..ListState::default()
        }
    }

    #[test]
    fn name_change_resets_page() {
        let mut state = on_page(3);
        state.set_name("alpha");
        assert_eq!(state.filters.name, "alpha");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = on_page(4);
        state.set_filter(FilterField::Status, 2);
        assert_eq!(state.filters.status_id, Some(2));
        assert_eq!(state.page, 1);

        let mut state = on_page(4);
        state.set_filter(FilterField::Status, 0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn sort_change_resets_page() {
        let mut state = on_page(2);
        state.set_sort("priority_name");
        assert_eq!(state.sort.column, SortColumn::PriorityName);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn unknown_sort_key_keeps_sort_and_resets_page() {
        let mut state = on_page(2);
        state.set_sort("owner");
        assert_eq!(state.sort, SortState::default());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn repeated_sort_toggles_and_new_column_resets_to_asc() {
        let mut state = ListState::default();
        state.set_sort("id");
        assert_eq!(state.sort.direction, SortDirection::Asc);
        state.set_sort("id");
        assert_eq!(state.sort.direction, SortDirection::Desc);
        state.set_sort("name");
        assert_eq!(state.sort.column, SortColumn::Name);
        assert_eq!(state.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn set_page_clamps_both_ends() {
        let mut state = ListState::default();
        state.set_page(10, 15);
        assert_eq!(state.page, 3);
        state.set_page(0, 15);
        assert_eq!(state.page, 1);
        state.set_page(2, 15);
        assert_eq!(state.page, 2);
        state.set_page(-1, 0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn set_page_keeps_filters_and_sort() {
        let mut state = ListState::default();
        state.set_filter(FilterField::Category, 3);
        state.set_sort("id");
        state.set_page(2, 30);
        assert_eq!(state.filters.category_id, Some(3));
        assert_eq!(state.sort.column, SortColumn::Id);
    }

    #[test]
    fn clear_filters_keeps_sort() {
        let mut state = ListState::default();
        state.set_name("x");
        state.set_filter(FilterField::Priority, 1);
        state.set_sort("status_name");
        state.set_page(3, 100);
        state.clear_filters();
        assert_eq!(state.active_filter_count(), 0);
        assert_eq!(state.sort.column, SortColumn::StatusName);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn derived_states_leave_original_untouched() {
        let state = on_page(2);
        let sorted = state.with_sort(SortColumn::Name);
        assert_eq!(sorted.sort.direction, SortDirection::Desc);
        assert_eq!(sorted.page, 1);
        assert_eq!(state.page, 2);
        assert_eq!(state.with_page(9, 20).page, 3);
    }
}
