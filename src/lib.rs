//! Metadata-only blob serving
//!
//! - [`http::QueryParams`] reads single and repeated query parameters from a raw query string.
//! - [`handler::BlobMetadataSlice`] answers with the size and file name of a stored blob
//!   without sending its content.
//!
//! The remaining modules carry the configuration, logging and HTTP/1.1 server the
//! `blobmeta` binary runs them in.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod storage;
