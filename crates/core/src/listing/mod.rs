//! Filter/sort/paginate state for list views.
//!
//! [`ListState`] is the whole of a list component's durable state. It is
//! decoded from and encoded to the page URL ([`query`]), mutated by the
//! transitions in [`state`], and handed to the repository layer to derive
//! the row query.

pub mod filter;
pub mod headers;
pub mod page;
pub mod query;
pub mod sort;
pub mod state;

pub use filter::{FilterField, FilterState};
pub use headers::{HeaderDescriptor, PROJECT_HEADERS};
pub use page::{clamp_page, last_page, page_offset, Page, PAGE_SIZE};
pub use sort::{SortColumn, SortDirection, SortState};
pub use state::ListState;
