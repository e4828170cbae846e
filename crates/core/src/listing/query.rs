//! Query-string codec for [`ListState`].
//!
//! The URL is the durable home of list state, so decoding never fails:
//! absent or malformed parameters fall back to their defaults. Encoding
//! always writes every parameter, which makes a reload idempotent.

use url::form_urlencoded;

use super::filter::{sanitize_id, FilterField};
use super::sort::{SortColumn, SortDirection};
use super::state::ListState;

pub const PARAM_NAME: &str = "name";
pub const PARAM_SORT_COLUMN: &str = "sortBy[column]";
pub const PARAM_SORT_DIRECTION: &str = "sortBy[direction]";
pub const PARAM_PAGE: &str = "page";

impl ListState {
    /// Decode from a raw query string (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut state = ListState::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PARAM_NAME => state.filters.name = value.into_owned(),
                PARAM_SORT_COLUMN => {
                    if let Some(column) = SortColumn::from_key(&value) {
                        state.sort.column = column;
                    }
                }
                PARAM_SORT_DIRECTION => {
                    if let Some(direction) = SortDirection::parse(&value) {
                        state.sort.direction = direction;
                    }
                }
                PARAM_PAGE => state.page = parse_page(&value),
                other => {
                    if let Some(field) = FilterField::from_param(other) {
                        if other == field.param() {
                            state.filters.set(field, parse_id(&value));
                        }
                    }
                }
            }
        }

        state
    }

    /// Encode every field, defaults included.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair(PARAM_NAME, &self.filters.name);
        for field in FilterField::ALL {
            let id = self.filters.get(field).unwrap_or(0);
            serializer.append_pair(field.param(), &id.to_string());
        }
        serializer
            .append_pair(PARAM_SORT_COLUMN, self.sort.column.key())
            .append_pair(PARAM_SORT_DIRECTION, self.sort.direction.as_str())
            .append_pair(PARAM_PAGE, &self.page.to_string());
        serializer.finish()
    }

    /// `path?query` for links and `history.replaceState`.
    pub fn url(&self, path: &str) -> String {
        format!("{path}?{}", self.to_query())
    }
}

fn parse_id(value: &str) -> i64 {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(sanitize_id)
        .unwrap_or(0)
}

fn parse_page(value: &str) -> i64 {
    value.trim().parse::<i64>().map(|p| p.max(1)).unwrap_or(1)
}
