//! URI query parameters
//!
//! Reads `name=value` pairs out of a raw, percent-encoded query string
//! (RFC 3986 section 3.4). Nothing is cached: every lookup re-parses the raw string.

use hyper::Uri;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Failure to percent-decode a matched parameter value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed percent-escape at byte {position} in '{raw}'")]
    MalformedEscape { raw: String, position: usize },
    #[error("decoded value of '{raw}' is not valid UTF-8")]
    InvalidUtf8 { raw: String },
}

/// Query parameters of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    query: Option<String>,
}

impl QueryParams {
    /// Parameters of a raw query string, `None` when the URI had no query
    pub fn new(query: Option<&str>) -> Self {
        Self {
            query: query.map(ToString::to_string),
        }
    }

    /// Parameters of the query portion of `uri`
    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(uri.query())
    }

    /// First value of parameter `name`
    ///
    /// Returns `Ok(None)` when no `name=` token exists. A token with an
    /// explicit empty value (`name=`) yields `Ok(Some(""))`.
    pub fn value(&self, name: &str) -> Result<Option<String>, DecodeError> {
        self.raw_values(name).next().map(decode).transpose()
    }

    /// All values of parameter `name`, in query order
    pub fn values(&self, name: &str) -> Result<Vec<String>, DecodeError> {
        self.raw_values(name).map(decode).collect()
    }

    /// Encoded values of every token with a `name=` prefix
    fn raw_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|token| !token.is_empty())
            .filter_map(move |token| token.strip_prefix(name)?.strip_prefix('='))
    }
}

/// Percent-decode a single value as UTF-8
///
/// `+` is kept as is: query values here are not form-encoded.
fn decode(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    if let Some(position) = bytes.iter().enumerate().find_map(|(i, &b)| {
        let valid = b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        (!valid).then_some(i)
    }) {
        return Err(DecodeError::MalformedEscape {
            raw: raw.to_string(),
            position,
        });
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8 {
            raw: raw.to_string(),
        })
}
