//! Domain logic for the Tabula admin UI.
//!
//! Everything in this crate is free of database and HTTP dependencies:
//! list state and its URL codec, declarative form validation, upload
//! inspection, and the input debouncer used by live list sessions.

pub mod debounce;
pub mod error;
pub mod forms;
pub mod listing;
pub mod types;
pub mod uploads;
pub mod validation;
