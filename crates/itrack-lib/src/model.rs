//! Core data types for itrack-lib.
//!
//! The serde layout of [`Issue`] is the persisted layout: camelCase keys,
//! kebab/lowercase enum values and `createdAt` as an RFC 3339 string.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// Issue workflow status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Human label, as shown in selection controls.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(TrackerError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Issue priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(TrackerError::InvalidPriority {
                priority: other.to_string(),
            }),
        }
    }
}

/// The primary issue entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Opaque unique ID, assigned at creation.
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: Status,

    pub priority: Priority,

    /// Creation timestamp (RFC 3339, millisecond precision, UTC).
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    #[schemars(with = "String")]
    pub created_at: DateTime<Utc>,
}

/// User-supplied fields for a new issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
}

impl IssueDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Mutable fields of an existing issue. `None` leaves the field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            priority: None,
        }
    }

    #[must_use]
    pub const fn priority(priority: Priority) -> Self {
        Self {
            status: None,
            priority: Some(priority),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }

    /// Apply the supplied fields to `issue`.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
    }
}

/// Current time truncated to whole milliseconds, the persisted precision.
#[must_use]
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Canonical textual form of a timestamp.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 with any offset (normalised to UTC) and bare
/// `YYYY-MM-DD` dates, which mean UTC midnight.
///
/// # Errors
///
/// Returns `Validation` if the text is neither form.
pub fn parse_timestamp(text: &str) -> crate::Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TrackerError::validation("createdAt", format!("unparseable timestamp '{text}'")))
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"todo\"");
        let parsed: Status = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, Status::Done);
    }

    #[test]
    fn test_status_from_str_aliases() {
        assert_eq!("In_Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("inprogress".parse::<Status>().unwrap(), Status::InProgress);
        assert!(matches!(
            "blocked".parse::<Status>(),
            Err(TrackerError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(TrackerError::InvalidPriority { .. })
        ));
    }

    #[test]
    fn test_unknown_enum_value_rejected_on_decode() {
        let json = r#"{"id":"1","title":"t","description":"","status":"open","priority":"low","createdAt":"2024-01-15"}"#;
        assert!(serde_json::from_str::<Issue>(json).is_err());
    }

    #[test]
    fn test_issue_camel_case_layout() {
        let issue = Issue {
            id: "1".to_string(),
            title: "Fix login bug".to_string(),
            description: "desc".to_string(),
            status: Status::InProgress,
            priority: Priority::High,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["createdAt"], "2024-01-15T00:00:00.000Z");
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["priority"], "high");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-20").unwrap(), midnight);
        assert_eq!(
            parse_timestamp("2024-01-20T00:00:00.000Z").unwrap(),
            midnight
        );
        assert_eq!(
            parse_timestamp("2024-01-20T02:00:00+02:00").unwrap(),
            midnight
        );
        assert!(parse_timestamp("last tuesday").is_err());
    }

    #[test]
    fn test_now_millis_round_trips_textually() {
        let now = now_millis();
        assert_eq!(parse_timestamp(&format_timestamp(&now)).unwrap(), now);
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let mut issue = Issue {
            id: "a".to_string(),
            title: "T".to_string(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Low,
            created_at: now_millis(),
        };
        IssueUpdate::priority(Priority::High).apply_to(&mut issue);
        assert_eq!(issue.status, Status::Todo);
        assert_eq!(issue.priority, Priority::High);
        assert!(IssueUpdate::default().is_empty());
    }

    #[test]
    fn test_draft_defaults() {
        let draft = IssueDraft::new("X", "Y");
        assert_eq!(draft.status, Status::Todo);
        assert_eq!(draft.priority, Priority::Low);
    }
}
