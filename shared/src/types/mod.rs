//! Type definitions shared by repositories and HTTP handlers
//!
//! - `pagination` - page requests, sort direction and page results

pub mod pagination;

pub use pagination::{Page, PageRequest, SortDirection};
