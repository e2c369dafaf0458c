//! Access log format module
//!
//! Supports `combined`, `common` and `json`. Unknown formats fall back to `combined`.

use chrono::{DateTime, Local};
use serde_json::json;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Access log entry for one handled request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address, `-` when unknown
    pub remote_addr: String,
    pub time: DateTime<Local>,
    /// Request start line as received
    pub request: String,
    pub status: u16,
    /// Size of the response body in bytes
    pub body_bytes: usize,
    /// Blob size advertised in `Content-Length` of a metadata response
    pub content_length: Option<u64>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, request: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            request,
            status: 200,
            body_bytes: 0,
            content_length: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request,
            self.status,
            self.body_bytes,
        )
    }

    /// Common format followed by blob size, user agent and request time
    fn format_combined(&self) -> String {
        format!(
            "{} {} \"{}\" {:.3}",
            self.format_common(),
            self.content_length
                .map_or_else(|| "-".to_string(), |size| size.to_string()),
            self.user_agent.as_deref().unwrap_or("-"),
            self.request_time_secs(),
        )
    }

    fn format_json(&self) -> String {
        json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "request": self.request,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "content_length": self.content_length,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    #[allow(clippy::cast_precision_loss)]
    fn request_time_secs(&self) -> f64 {
        self.request_time_us as f64 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "HEAD /repo/lib.jar?x=1 HTTP/1.1".to_string(),
        );
        entry.status = 200;
        entry.content_length = Some(4096);
        entry.user_agent = Some("curl/8.0".to_string());
        entry.request_time_us = 1500;
        entry
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.ends_with("\"HEAD /repo/lib.jar?x=1 HTTP/1.1\" 200 0"));
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.contains("\"HEAD /repo/lib.jar?x=1 HTTP/1.1\" 200 0 4096"));
        assert!(log.contains("\"curl/8.0\""));
        // 1500us rounds to 0.002s
        assert!(log.ends_with(" 0.002"), "got: {log}");
    }

    #[test]
    fn test_unknown_format_is_combined() {
        let entry = create_test_entry();
        assert_eq!(entry.format("nginx-ish"), entry.format("combined"));
    }

    #[test]
    fn test_format_json() {
        let mut entry = create_test_entry();
        entry.status = 404;
        entry.content_length = None;
        entry.body_bytes = 15;

        let value: serde_json::Value = serde_json::from_str(&entry.format("json")).unwrap();
        assert_eq!(value["remote_addr"], "192.168.1.1");
        assert_eq!(value["status"], 404);
        assert_eq!(value["body_bytes"], 15);
        assert!(value["content_length"].is_null());
        assert_eq!(value["request"], "HEAD /repo/lib.jar?x=1 HTTP/1.1");
    }
}
