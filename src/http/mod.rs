//! HTTP protocol layer module
//!
//! Response construction, decoupled from how the body was obtained.

pub mod response;

// Re-export commonly used builders
pub use response::{build_file_response, build_not_found_response, CONTENT_TYPE};
