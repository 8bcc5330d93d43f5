//! Request handler module
//!
//! Maps every request target onto a file under the serving root and answers
//! with its contents or a 404.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use static_files::{resolve_target, ReadError, ResolvedPath};
