//! Normalized repository record and the item-to-record mapping.
//!
//! Search items are deserialized leniently: every field is optional and may be
//! `null`. Numeric columns never carry a missing value; they fall back to 0.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel for a missing language or owner type.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel for a missing license identifier.
pub const NO_LICENSE: &str = "None";

/// One row of the collected table.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// `owner/name`; the identity key used for deduplication.
    pub full_name: String,
    pub description: String,
    pub language: String,
    pub license: String,
    pub owner_type: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
    pub size_kb: u64,
    pub has_issues: u8,
    pub is_fork: u8,
    pub archived: u8,
    pub repo_url: String,
}

impl Record {
    /// Column names in table order.
    pub const COLUMNS: [&'static str; 14] = [
        "full_name",
        "description",
        "language",
        "license",
        "owner_type",
        "stars",
        "forks",
        "open_issues",
        "watchers",
        "size_kb",
        "has_issues",
        "is_fork",
        "archived",
        "repo_url",
    ];

    /// Maps one search result item. Returns `None` if the item is not an object.
    #[must_use]
    pub fn from_item(item: &Value) -> Option<Self> {
        let item = item.as_object()?;
        let license = item.get("license");
        let owner = item.get("owner");

        Some(Self {
            full_name: text(item.get("full_name")).unwrap_or_default().to_string(),
            description: text(item.get("description")).unwrap_or_default().to_string(),
            language: text(item.get("language")).unwrap_or(UNKNOWN).to_string(),
            license: text(license.and_then(|l| l.get("spdx_id")))
                .unwrap_or(NO_LICENSE)
                .to_string(),
            owner_type: text(owner.and_then(|o| o.get("type")))
                .unwrap_or(UNKNOWN)
                .to_string(),
            stars: count(item.get("stargazers_count")),
            forks: count(item.get("forks_count")),
            open_issues: count(item.get("open_issues_count")),
            watchers: count(item.get("watchers_count")),
            size_kb: count(item.get("size")),
            has_issues: flag(item.get("has_issues")),
            is_fork: flag(item.get("fork")),
            archived: flag(item.get("archived")),
            repo_url: text(item.get("html_url")).unwrap_or_default().to_string(),
        })
    }

    /// The deduplication key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.full_name
    }
}

/// Non-empty string value.
fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Non-negative integer coercion: null/absent/garbage become 0, negatives clamp
/// to 0, floats truncate, numeric strings parse.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Bool(b)) => u64::from(*b),
        _ => 0,
    }
}

/// Truthiness as 0/1.
fn flag(value: Option<&Value>) -> u8 {
    let truthy = match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    };
    u8::from(truthy)
}
