//! Request start line parsing
//!
//! Splits an HTTP start line such as `GET /blob/a.bin?x=1 HTTP/1.1` into
//! method, target URI and protocol version.

use hyper::{Method, Uri};
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Invalid request start line
#[derive(Debug, Error)]
pub enum RequestLineError {
    #[error("request line '{0}' must have exactly three parts")]
    Parts(String),
    #[error("invalid method in request line '{line}'")]
    Method {
        line: String,
        #[source]
        source: hyper::http::method::InvalidMethod,
    },
    #[error("invalid target in request line '{line}'")]
    Target {
        line: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },
    #[error("path '{path}' does not decode to UTF-8")]
    PathEncoding {
        path: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Parsed HTTP start line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    uri: Uri,
    version: String,
}

impl RequestLine {
    /// Parse a `METHOD target VERSION` line
    pub fn parse(line: &str) -> Result<Self, RequestLineError> {
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(RequestLineError::Parts(line.to_string()));
        };

        let method = method
            .parse::<Method>()
            .map_err(|source| RequestLineError::Method {
                line: line.to_string(),
                source,
            })?;
        let uri = target
            .parse::<Uri>()
            .map_err(|source| RequestLineError::Target {
                line: line.to_string(),
                source,
            })?;

        Ok(Self {
            method,
            uri,
            version: version.to_string(),
        })
    }

    /// Build a start line from the parts hyper already parsed
    pub fn from_parts(method: &Method, uri: &Uri, version: hyper::Version) -> Self {
        Self {
            method: method.clone(),
            uri: uri.clone(),
            version: version_str(version).to_string(),
        }
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Path component of the target, `/` when the target has none
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Percent-decoded path, as the blob it names is stored
    pub fn decoded_path(&self) -> Result<String, RequestLineError> {
        let path = self.uri.path();
        percent_decode_str(path)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|source| RequestLineError::PathEncoding {
                path: path.to_string(),
                source,
            })
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for RequestLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.method, self.uri, self.version)
    }
}

fn version_str(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "HTTP/0.9",
        hyper::Version::HTTP_10 => "HTTP/1.0",
        hyper::Version::HTTP_2 => "HTTP/2.0",
        hyper::Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}
