//! Schedule resources as exchanged with the Kronos API.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status reported by the server.
///
/// Unknown values are kept verbatim so newer servers still display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScheduleStatus {
    #[default]
    NotStarted,
    Active,
    Paused,
    Expired,
    Unknown(String),
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ScheduleStatus::NotStarted => "not_started",
            ScheduleStatus::Active => "active",
            ScheduleStatus::Paused => "paused",
            ScheduleStatus::Expired => "expired",
            ScheduleStatus::Unknown(raw) => raw,
        }
    }

    /// Human-readable label ("Not started", "Active", ...).
    pub fn label(&self) -> String {
        let raw = self.as_str().replace('_', " ");
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ScheduleStatus::Unknown(_))
    }
}

impl From<String> for ScheduleStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "not_started" => ScheduleStatus::NotStarted,
            "active" => ScheduleStatus::Active,
            "paused" => ScheduleStatus::Paused,
            // older servers report finished schedules as "elapsed"
            "expired" | "elapsed" => ScheduleStatus::Expired,
            _ => ScheduleStatus::Unknown(value),
        }
    }
}

impl From<ScheduleStatus> for String {
    fn from(status: ScheduleStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule as returned by `GET /schedules`.
///
/// Timestamps stay as the RFC 3339 strings the server sends; the server uses
/// the zero time for fields that do not apply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    pub id: String,
    pub title: String,
    pub status: ScheduleStatus,
    pub description: String,
    pub cron_expr: String,
    pub url: String,
    pub email: String,
    pub metadata: serde_json::Value,
    pub is_recurring: bool,
    pub created_at: String,
    pub next_schedule_at: String,
    pub run_at: String,
    pub start_at: String,
    pub end_at: String,
}

impl Schedule {
    /// Metadata rendered for display; empty objects and null render as an empty string.
    pub fn metadata_display(&self) -> String {
        match &self.metadata {
            serde_json::Value::Null => String::new(),
            serde_json::Value::Object(map) if map.is_empty() => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of `POST /schedules`.
///
/// A one-shot schedule sends `runAt` and repeats it as `startAt`/`endAt`,
/// which the server requires to be equal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub title: String,
    pub description: String,
    pub url: String,
    pub email: String,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl NewSchedule {
    /// A schedule firing once at `run_at` (RFC 3339).
    pub fn one_shot(title: impl Into<String>, url: impl Into<String>, email: impl Into<String>, run_at: String) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            email: email.into(),
            is_recurring: false,
            start_at: Some(run_at.clone()),
            end_at: Some(run_at.clone()),
            run_at: Some(run_at),
            ..Default::default()
        }
    }

    /// A schedule firing on `cron_expr` between `start_at` and `end_at` (RFC 3339).
    pub fn recurring(
        title: impl Into<String>,
        url: impl Into<String>,
        email: impl Into<String>,
        cron_expr: impl Into<String>,
        start_at: String,
        end_at: String,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            email: email.into(),
            is_recurring: true,
            cron_expr: Some(cron_expr.into()),
            start_at: Some(start_at),
            end_at: Some(end_at),
            ..Default::default()
        }
    }
}
