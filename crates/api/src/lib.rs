//! HTTP front end of the Tabula admin UI: server-rendered pages for
//! projects and users plus the live projects list session.

pub mod config;
pub mod error;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod live;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
pub mod templates;
pub mod views;
