use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Logical keys shared across the stores. Each key maps to one file in the
/// data directory.
pub mod keys {
    pub const STUDENT_PROFILE: &str = "studentProfile";
    pub const STUDENT_APPLICATIONS: &str = "studentApplications";
    pub const STUDENT_STATS: &str = "studentStats";
    pub const PROFILE_COMPLETION: &str = "profileCompletion";
    pub const JOBS: &str = "jobs";

    pub fn notifications(role: &str) -> String {
        format!("notifications_{role}")
    }
}

/// Best-effort key/value persistence over plain files, one file per key.
///
/// Reads never fail from the caller's point of view: a missing, unreadable,
/// or undecodable value is reported as absent. Writes are fire-and-forget;
/// when one fails the in-memory state stays authoritative for the rest of the
/// session. There is no locking, so concurrent processes sharing a data
/// directory overwrite each other last-writer-wins.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(err) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %err, "could not create data directory");
        }
        Self { dir }
    }

    /// Per-user data directory, used when no explicit location is configured.
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "campusconnect")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".campusconnect"))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    pub fn write(&self, key: &str, value: &str) {
        if let Err(err) = fs::write(self.key_path(key), value) {
            warn!(key, error = %err, "persist failed, keeping in-memory state");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = fs::remove_file(self.key_path(key)) {
            debug!(key, error = %err, "remove skipped");
        }
    }

    /// Decoded read; a value that fails to parse counts as absent so callers
    /// fall back to their seeded defaults.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "malformed stored value, treating as absent");
                None
            }
        }
    }

    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write(key, &raw),
            Err(err) => warn!(key, error = %err, "could not encode value, skipping persist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_returns_none_for_missing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        assert_eq!(store.read("studentProfile"), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        store.write("profileCompletion", "75");
        assert_eq!(store.read("profileCompletion").as_deref(), Some("75"));
    }

    #[test]
    fn last_writer_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        store.write("jobs", "[]");
        store.write("jobs", "[1]");
        assert_eq!(store.read("jobs").as_deref(), Some("[1]"));
    }

    #[test]
    fn malformed_json_reads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        store.write("studentApplications", "{not json");
        let parsed: Option<Vec<String>> = store.read_json("studentApplications");
        assert_eq!(parsed, None);
    }

    #[test]
    fn write_into_unwritable_dir_is_swallowed() {
        let store = LocalStore::open("/proc/does-not-exist/campusconnect");
        store.write("studentProfile", "{}");
        assert_eq!(store.read("studentProfile"), None);
    }
}
