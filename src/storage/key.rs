// Storage key module
// Keys are `/`-joined, non-empty segments derived from request paths

use std::fmt;

/// Opaque address of a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    parts: Vec<String>,
}

impl Key {
    /// Key from `/`-separated segments, empty segments are dropped
    pub fn new(path: &str) -> Self {
        Self {
            parts: path
                .split('/')
                .filter(|part| !part.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Key segments joined with `/`
    pub fn string(&self) -> String {
        self.parts.join("/")
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

/// Mapping from a request path to the key it addresses
pub trait PathToKey: Send + Sync {
    fn key(&self, path: &str) -> Key;
}

impl<F> PathToKey for F
where
    F: Fn(&str) -> Key + Send + Sync,
{
    fn key(&self, path: &str) -> Key {
        self(path)
    }
}

/// Default transform: the path itself, without leading or trailing slashes
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyFromPath;

impl PathToKey for KeyFromPath {
    fn key(&self, path: &str) -> Key {
        Key::new(path)
    }
}
