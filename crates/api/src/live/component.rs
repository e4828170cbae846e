//! State machine behind one live projects list.

use tabula_core::listing::{FilterField, ListState, Page};
use tabula_db::models::project::ProjectRow;
use tera::Context;

use super::protocol::{ClientEvent, ServerEvent};
use crate::templates::Templates;
use crate::views::ProjectListView;

/// What the session has to do after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// State changed; fetch and render.
    Fetch,
    /// A search term to apply once typing goes quiet.
    Debounce(String),
    /// Only the drawer changed.
    Drawer(bool),
    /// Nothing to do.
    Ignore,
}

#[derive(Debug, Clone)]
pub struct ProjectListComponent {
    state: ListState,
    /// Size of the filtered set as of the last fetch; `None` before it.
    total_count: Option<i64>,
    show_filters: bool,
}

impl ProjectListComponent {
    pub fn new(state: ListState) -> Self {
        Self {
            state,
            total_count: None,
            show_filters: false,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn show_filters(&self) -> bool {
        self.show_filters
    }

    pub fn apply(&mut self, event: ClientEvent) -> Effect {
        match event {
            ClientEvent::SetName { value } => Effect::Debounce(value),
            ClientEvent::SetFilter { field, value } => match FilterField::from_param(&field) {
                Some(field) => {
                    self.state.set_filter(field, value);
                    Effect::Fetch
                }
                None => {
                    tracing::debug!(field = %field, "Ignoring unknown filter field");
                    Effect::Ignore
                }
            },
            ClientEvent::SetSort { column } => {
                self.state.set_sort(&column);
                Effect::Fetch
            }
            ClientEvent::SetPage { page } => {
                match self.total_count {
                    Some(total) => self.state.set_page(page, total),
                    // The fetch clamps the upper bound.
                    None => self.state.page = page.max(1),
                }
                Effect::Fetch
            }
            ClientEvent::ClearFilters => {
                self.state.clear_filters();
                Effect::Fetch
            }
            ClientEvent::ToggleFilters { open } => {
                self.show_filters = open;
                Effect::Drawer(open)
            }
        }
    }

    /// Apply a debounced search term.
    pub fn set_name(&mut self, name: String) {
        self.state.set_name(name);
    }

    /// Adopt a fetch result for the current state and render it.
    pub fn render(
        &mut self,
        page: &Page<ProjectRow>,
        templates: &Templates,
    ) -> Result<ServerEvent, tera::Error> {
        self.state.page = page.page;
        self.total_count = Some(page.total_count);

        let view = ProjectListView::build(&self.state, page, self.show_filters);
        let mut context = Context::new();
        context.insert("list", &view);
        let html = templates.render_string("projects/_table.html", &context)?;

        Ok(ServerEvent::Render {
            url: view.url,
            html,
            filters: view.filters,
            active_filter_count: view.active_filter_count,
            total_count: page.total_count,
            page: page.page,
        })
    }
}
