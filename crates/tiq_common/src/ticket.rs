//! Ticket records as delivered by the feed, plus per-field classification.
//!
//! The feed schema is not owned by this crate: fields arrive loosely typed
//! (numbers as strings, absent objects, free-text statuses), so every field
//! is optional and numeric fields accept both JSON forms.

use serde::{Deserialize, Serialize};

/// Priority codes used by the feed
pub const PRIORITY_LOW: i64 = 1;
pub const PRIORITY_NORMAL: i64 = 2;
pub const PRIORITY_HIGH: i64 = 3;
pub const PRIORITY_EMERGENCY: i64 = 4;

/// Placeholder shown when a requester has neither name nor email
pub const REQUESTER_PLACEHOLDER: &str = "-";

/// Coarse status classification derived from the raw status string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Open,
    Pending,
    Closed,
    Other,
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Pending => write!(f, "pending"),
            Self::Closed => write!(f, "closed"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Nested `name` object on the requester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameField {
    pub name: Option<String>,
}

/// Nested `email` object on the requester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailField {
    pub email: Option<String>,
}

/// The requester attached to a ticket; both branches optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Requester {
    pub name: Option<NameField>,
    pub email: Option<EmailField>,
}

/// A single support ticket as returned by the feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    /// Unique identifier, immutable
    #[serde(deserialize_with = "flex::opt_i64")]
    pub id: Option<i64>,
    /// Display identifier, may arrive as string or number
    #[serde(deserialize_with = "flex::opt_string")]
    pub number: Option<String>,
    /// Free-text status string
    pub status: Option<String>,
    /// Numeric priority code, may arrive as string or number
    #[serde(deserialize_with = "flex::opt_i64")]
    pub priority_id: Option<i64>,
    /// Free-text department label
    pub dept: Option<String>,
    /// Creation timestamp, space- or T-separated
    pub created: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub user: Option<Requester>,
}

impl Ticket {
    /// Classify the raw status by case-insensitive substring match.
    ///
    /// First match wins in the order open, pending, closed. Counting code
    /// that wants the intentionally non-exclusive buckets should match the
    /// lower-cased string itself; this is the single-bucket view used for
    /// display.
    pub fn status_class(&self) -> StatusClass {
        let s = self.status.as_deref().unwrap_or("").to_lowercase();
        if s.contains("open") {
            StatusClass::Open
        } else if s.contains("pend") {
            StatusClass::Pending
        } else if s.contains("clos") {
            StatusClass::Closed
        } else {
            StatusClass::Other
        }
    }

    /// Human label for the priority code; unknown codes render as the raw
    /// value, a missing code as `"-"`.
    pub fn priority_label(&self) -> String {
        match self.priority_id {
            Some(PRIORITY_LOW) => "Low".to_string(),
            Some(PRIORITY_NORMAL) => "Normal".to_string(),
            Some(PRIORITY_HIGH) => "High".to_string(),
            Some(PRIORITY_EMERGENCY) => "Emergency".to_string(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        }
    }

    /// Department label, `"Unknown"` when absent or empty
    pub fn dept_label(&self) -> &str {
        match self.dept.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "Unknown",
        }
    }

    /// Requester name if present, else email, else a placeholder
    pub fn requester_display(&self) -> &str {
        self.requester_name()
            .or_else(|| self.requester_email())
            .unwrap_or(REQUESTER_PLACEHOLDER)
    }

    /// Requester name only (used by the table filter)
    pub fn requester_name(&self) -> Option<&str> {
        self.user
            .as_ref()?
            .name
            .as_ref()?
            .name
            .as_deref()
            .filter(|s| !s.is_empty())
    }

    fn requester_email(&self) -> Option<&str> {
        self.user
            .as_ref()?
            .email
            .as_ref()?
            .email
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

/// Deserializers tolerating the feed's string-or-number fields
mod flex {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNum {
        Str(String),
        Int(i64),
        Float(f64),
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<StringOrNum>::deserialize(deserializer)?;
        Ok(raw.map(|v| match v {
            StringOrNum::Str(s) => s,
            StringOrNum::Int(i) => i.to_string(),
            StringOrNum::Float(f) => f.to_string(),
        }))
    }

    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<StringOrNum>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| match v {
            StringOrNum::Str(s) => s.trim().parse::<i64>().ok(),
            StringOrNum::Int(i) => Some(i),
            StringOrNum::Float(f) => Some(f as i64),
        }))
    }
}
