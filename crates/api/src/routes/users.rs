use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                 -> index (?page=)
/// GET    /{id}/edit        -> edit
/// POST   /{id}             -> update (multipart, avatar upload)
/// POST   /{id}/delete      -> destroy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/{id}/edit", get(users::edit))
        .route("/{id}", post(users::update))
        .route("/{id}/delete", post(users::destroy))
}
