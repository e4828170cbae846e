//! Template view models.
//!
//! Everything a template shows is computed here, so templates only loop
//! and print. Link targets are derived from the current [`ListState`]
//! with the same transitions the live session applies, which keeps plain
//! links and live events in agreement.

use std::collections::BTreeMap;

use serde::Serialize;
use tabula_core::listing::{
    FilterField, HeaderDescriptor, ListState, Page, PROJECT_HEADERS,
};
use tabula_core::types::DbId;
use tabula_db::models::lookup::LookupOption;
use tabula_db::models::project::ProjectRow;
use tabula_db::models::user::UserRow;

pub const PROJECTS_PATH: &str = "/projects";
pub const USERS_PATH: &str = "/users";

/// Page links shown on either side of the current page.
const PAGE_WINDOW: i64 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub key: &'static str,
    pub label: &'static str,
    pub class: Option<&'static str>,
    /// Sort key sent by the live session when the header is clicked.
    pub sort_key: Option<&'static str>,
    pub href: Option<String>,
    /// `asc`/`desc` on the column currently sorted by.
    pub direction: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub value: String,
    pub class: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub id: DbId,
    pub edit_href: String,
    pub delete_href: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub number: i64,
    pub href: String,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationView {
    pub page: i64,
    pub last_page: i64,
    pub total_count: i64,
    pub first_item: i64,
    pub last_item: i64,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
    pub links: Vec<PageLink>,
}

impl PaginationView {
    pub fn build<T>(page: &Page<T>, href: impl Fn(i64) -> String) -> Self {
        let last_page = page.last_page();
        let link = |number: i64| PageLink {
            number,
            href: href(number),
            current: number == page.page,
        };

        let start = (page.page - PAGE_WINDOW).max(1);
        let end = (page.page + PAGE_WINDOW).min(last_page);

        Self {
            page: page.page,
            last_page,
            total_count: page.total_count,
            first_item: page.first_item(),
            last_item: page.last_item(),
            previous: page.has_previous().then(|| link(page.page - 1)),
            next: page.has_next().then(|| link(page.page + 1)),
            links: (start..=end).map(link).collect(),
        }
    }
}

/// Current filter values as the form controls show them (`0` = all).
#[derive(Debug, Clone, Serialize)]
pub struct FilterView {
    pub name: String,
    pub status_id: DbId,
    pub category_id: DbId,
    pub priority_id: DbId,
}

impl FilterView {
    pub fn from_state(state: &ListState) -> Self {
        let id = |field| state.filters.get(field).unwrap_or(0);
        Self {
            name: state.filters.name.clone(),
            status_id: id(FilterField::Status),
            category_id: id(FilterField::Category),
            priority_id: id(FilterField::Priority),
        }
    }
}

/// Options for the filter selects and the project form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectLookups {
    pub statuses: Vec<LookupOption>,
    pub categories: Vec<LookupOption>,
    pub priorities: Vec<LookupOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectListView {
    /// Canonical URL of this exact state.
    pub url: String,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
    pub filters: FilterView,
    /// Current sort, resubmitted by the filter form so it survives a search.
    pub sort_column: &'static str,
    pub sort_direction: &'static str,
    pub active_filter_count: usize,
    pub clear_href: String,
    pub is_empty: bool,
    pub show_filters: bool,
}

impl ProjectListView {
    /// `page` must be the result of fetching `state`; its clamped page
    /// number wins over the one in `state`.
    pub fn build(state: &ListState, page: &Page<ProjectRow>, show_filters: bool) -> Self {
        let mut state = state.clone();
        state.page = page.page;
        let total = page.total_count;

        let headers = PROJECT_HEADERS
            .iter()
            .map(|header| header_view(&state, header))
            .collect();

        let rows = page
            .items
            .iter()
            .map(|row| RowView {
                id: row.id,
                edit_href: format!("{PROJECTS_PATH}/{}/edit", row.id),
                delete_href: format!("{PROJECTS_PATH}/{}/delete", row.id),
                cells: PROJECT_HEADERS
                    .iter()
                    .map(|header| CellView {
                        value: project_cell(row, header.key),
                        class: header.class,
                    })
                    .collect(),
            })
            .collect();

        Self {
            url: state.url(PROJECTS_PATH),
            headers,
            rows,
            pagination: PaginationView::build(page, |n| {
                state.with_page(n, total).url(PROJECTS_PATH)
            }),
            filters: FilterView::from_state(&state),
            sort_column: state.sort.column.key(),
            sort_direction: state.sort.direction.as_str(),
            active_filter_count: state.active_filter_count(),
            clear_href: state.cleared().url(PROJECTS_PATH),
            is_empty: page.is_empty(),
            show_filters,
        }
    }
}

fn header_view(state: &ListState, header: &HeaderDescriptor) -> HeaderView {
    let column = header.sort_column();
    let direction = column
        .filter(|c| *c == state.sort.column)
        .map(|_| state.sort.direction.as_str());

    HeaderView {
        key: header.key,
        label: header.label,
        class: header.class,
        sort_key: column.map(|c| c.key()),
        href: column.map(|c| state.with_sort(c).url(PROJECTS_PATH)),
        direction,
    }
}

fn project_cell(row: &ProjectRow, key: &str) -> String {
    let name = |value: &Option<String>| value.clone().unwrap_or_default();
    match key {
        "id" => row.id.to_string(),
        "name" => row.name.clone(),
        "status.name" => name(&row.status_name),
        "category.name" => name(&row.category_name),
        "priority.name" => name(&row.priority_name),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRowView {
    #[serde(flatten)]
    pub user: UserRow,
    pub avatar_url: Option<String>,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListView {
    pub rows: Vec<UserRowView>,
    pub pagination: PaginationView,
    pub is_empty: bool,
}

impl UserListView {
    pub fn build(page: Page<UserRow>) -> Self {
        let pagination = PaginationView::build(&page, |n| format!("{USERS_PATH}?page={n}"));
        let is_empty = page.is_empty();
        let rows = page
            .items
            .into_iter()
            .map(|user| UserRowView {
                avatar_url: user.avatar.as_deref().map(avatar_url),
                edit_href: format!("{USERS_PATH}/{}/edit", user.id),
                delete_href: format!("{USERS_PATH}/{}/delete", user.id),
                user,
            })
            .collect();

        Self {
            rows,
            pagination,
            is_empty,
        }
    }
}

/// Form field values with every field in `fields` present, so templates
/// never read an undefined key.
pub fn form_values(
    fields: &[&str],
    mut values: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    for field in fields {
        values.entry((*field).to_string()).or_default();
    }
    values
}

/// Public URL of a stored avatar.
pub fn avatar_url(relative: &str) -> String {
    format!("/storage/{relative}")
}
