//! Error conversion shared by every route

pub mod error;

pub use error::{json_config, path_config, query_config, ApiError, ApiResult};
