//! Application lifecycle metadata.
//!
//! Statuses are plain strings and no transition is ever validated: callers
//! may write any status after any other. This module only answers "how should
//! this status be presented", with a neutral fallback for values outside the
//! known set.

pub const STATUSES: [&str; 5] = ["applied", "under-review", "interview", "offer", "rejected"];

/// Statuses counted as "in progress" on the applications summary.
pub const PENDING_STATUSES: [&str; 3] = ["applied", "under-review", "interview"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub label: String,
    pub icon: &'static str,
    pub tone: &'static str,
}

pub fn status_info(status: &str) -> StatusInfo {
    let (label, icon, tone) = match status {
        "applied" => ("Applied", "clock", "blue"),
        "under-review" => ("Under Review", "alert", "yellow"),
        "interview" => ("Interview", "calendar", "purple"),
        "offer" => ("Offer Received", "check", "green"),
        "rejected" => ("Rejected", "alert", "red"),
        other => (other, "clock", "gray"),
    };
    StatusInfo {
        label: label.to_string(),
        icon,
        tone,
    }
}

/// Terminal statuses have no defined outgoing transition. Display grouping
/// only; writes are never rejected based on this.
pub fn is_terminal(status: &str) -> bool {
    matches!(status, "offer" | "rejected")
}
