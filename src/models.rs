use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
    pub gpa: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub filename: String,
    pub upload_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub resume: Resume,
    pub cover_letter: String,
    pub email_notifications: bool,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub step: String,
    /// Calendar date or the literal "TBD" for steps not yet scheduled.
    pub date: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub stipend: String,
    /// Free-form status string; `lifecycle::status_info` supplies display
    /// metadata and tolerates values outside the known set.
    pub status: String,
    pub applied_date: String,
    pub progress: u8,
    pub next_step: String,
    pub timeline: Vec<TimelineStep>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr: Option<HrContact>,
}

/// Partial update applied to one application; `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub status: Option<String>,
    pub progress: Option<u8>,
    pub next_step: Option<String>,
    pub notes: Option<String>,
    pub timeline: Option<Vec<TimelineStep>>,
    pub hr: Option<HrContact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    /// Always derived from the application list; never loaded as-is.
    #[serde(default)]
    pub applications: usize,
    #[serde(default)]
    pub interviews: u32,
    #[serde(default)]
    pub offers: u32,
    #[serde(default)]
    pub profile_views: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Alert,
    Info,
    Message,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Notification payload as published on the hub, before a store fills in the
/// generated fields.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub kind: NotificationKind,
}

impl NotificationDraft {
    pub fn into_notification(self, now: DateTime<Utc>) -> Notification {
        Notification {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            description: self.description,
            date: now,
            read: false,
            kind: self.kind,
        }
    }
}

/// Event accepted by the notification hub. `role = None` broadcasts to every
/// registered store.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub role: Option<String>,
    pub notification: NotificationDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stipend: String,
    pub duration: String,
    pub posted: String,
    pub deadline: String,
    pub description: String,
    pub requirements: Vec<String>,
}
