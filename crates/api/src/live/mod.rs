//! Live projects list over a WebSocket.
//!
//! The page opens `/projects/live` with its current query string. Control
//! changes are sent as [`ClientEvent`]s; every state change answers with a
//! freshly rendered table fragment and the canonical URL, which the page
//! writes into the address bar. A plain GET of that URL renders the same
//! table.

pub mod component;
pub mod protocol;
pub mod session;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{RawQuery, State};
use axum::response::IntoResponse;
use tabula_core::listing::ListState;

use crate::state::AppState;

pub use component::{Effect, ProjectListComponent};
pub use protocol::{ClientEvent, ServerEvent};

/// GET /projects/live
pub async fn projects_live(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let initial = ListState::from_query(query.as_deref().unwrap_or_default());
    ws.on_upgrade(move |socket| session::run(socket, state, initial))
}
