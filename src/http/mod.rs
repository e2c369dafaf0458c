//! HTTP protocol layer module
//!
//! Request-side parsing (start line, query parameters) and response-side
//! builders, decoupled from storage and routing.

pub mod headers;
pub mod query;
pub mod request_line;
pub mod response;

// Re-export commonly used types
pub use query::{DecodeError, QueryParams};
pub use request_line::{RequestLine, RequestLineError};
pub use response::{
    build_400_response, build_405_response, build_500_response, build_metadata_response,
    build_not_found_response,
};
