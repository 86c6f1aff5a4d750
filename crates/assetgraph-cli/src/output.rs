//! Output formatting utilities

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Pretty JSON for `--format json`
pub fn to_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Body preview for table output: UTF-8 text as is, anything else as a size
pub fn body_preview(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) if text.is_empty() => "-".to_string(),
        Ok(text) => text.to_string(),
        Err(_) => format!("<{} bytes>", body.len()),
    }
}
