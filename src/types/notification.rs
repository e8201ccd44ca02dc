use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Notification-specific enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewRepair,
    StatusUpdate,
    Feedback,
    Announcement,
    #[serde(other)]
    Unknown,
}

impl NotificationKind {
    /// Stable display name for feed rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewRepair => "new repair",
            Self::StatusUpdate => "status update",
            Self::Feedback => "feedback",
            Self::Announcement => "announcement",
            Self::Unknown => "other",
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerant deserializers for PHP-backend quirks
// ---------------------------------------------------------------------------

/// Deserialize a `DateTime<Utc>` from either RFC 3339 or the backend's
/// naive `YYYY-MM-DD HH:MM:SS` form (assumed UTC).
pub(crate) mod datetime_de {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Deserialize a boolean the backend may encode as `true`/`false`, `0`/`1`,
/// or `"0"`/`"1"`.
pub(crate) mod flag_de {
    use serde::{self, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Int(n) => n != 0,
            Flag::Str(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        })
    }
}

// ---------------------------------------------------------------------------
// Notification domain type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Owning user (the recipient).
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Related repair ticket, if any.
    pub repair_id: Option<String>,
    #[serde(default, deserialize_with = "flag_de::deserialize")]
    pub is_read: bool,
    pub created_by: String,
    #[serde(deserialize_with = "datetime_de::deserialize")]
    pub created_at: DateTime<Utc>,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
