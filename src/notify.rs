use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::{Notification, NotificationEvent, NotificationKind};
use crate::storage::{keys, LocalStore};

pub const ROLES: [&str; 4] = ["student", "placement-cell", "faculty", "employer"];

fn seeded(
    role: &str,
    now: DateTime<Utc>,
    offset_mins: i64,
    title: &str,
    description: &str,
    kind: NotificationKind,
) -> Notification {
    Notification {
        id: format!("{role}-{offset_mins}"),
        title: title.to_string(),
        description: Some(description.to_string()),
        date: now - Duration::minutes(offset_mins),
        read: false,
        kind,
    }
}

/// Deterministic per-role seed inbox. Offsets are minutes before `now`, in
/// strictly descending recency; unrecognized roles seed empty.
pub fn seed_for_role(role: &str, now: DateTime<Utc>) -> Vec<Notification> {
    use NotificationKind::{Alert, Info, Message, Success};

    let table: &[(i64, &str, &str, NotificationKind)] = match role {
        "student" => &[
            (2, "New Opportunity", "Google SDE Intern - Applications open now! Deadline: Oct 15", Success),
            (5, "Interview Scheduled", "Technical interview with Infosys Digital on 5 Oct, 2:00 PM", Success),
            (12, "Application Shortlisted", "Congratulations! You are shortlisted for Microsoft Intern position", Success),
            (25, "Interview Reminder", "HR interview with TCS tomorrow at 10:30 AM", Alert),
            (45, "Document Required", "Upload updated resume for Amazon internship application", Alert),
            (60, "Application Viewed", "Your application for Data Analyst Intern at Wipro was viewed", Info),
            (90, "Placement Drive Alert", "Accenture campus drive on Oct 20. Register by Oct 18", Info),
            (120, "Application Status Update", "Your IBM internship application is under review", Info),
            (150, "Skills Assessment", "Complete coding assessment for Capgemini before Oct 12", Message),
            (180, "Profile Tip", "Add more projects to improve visibility to 80+ companies", Message),
            (240, "New Job Alert", "15 new internship opportunities match your profile", Info),
            (300, "Interview Feedback", "Technical interview feedback available for Cognizant position", Message),
            (360, "Application Deadline", "Only 2 days left to apply for Deloitte Summer Internship", Alert),
            (420, "Profile Views", "3 companies viewed your profile this week", Success),
        ],
        "faculty" => &[
            (8, "New Approval Request", "Recommendation needed for Aarav Sharma", Alert),
            (90, "Report Ready", "Weekly mentee progress report generated", Success),
        ],
        "placement-cell" => &[
            (3, "New Job Posted", "Employer added \u{201c}Frontend Intern\u{201d} role", Info),
            (40, "High Application Traffic", "Applications spiked 35% today", Success),
        ],
        "employer" => &[
            (2, "New Candidate Applied", "Aarav Sharma applied to Software Intern", Info),
            (120, "Interview Reminder", "Data Science Intern interview tomorrow", Alert),
        ],
        _ => &[],
    };

    table
        .iter()
        .map(|(offset, title, description, kind)| {
            seeded(role, now, *offset, title, description, *kind)
        })
        .collect()
}

/// Per-role notification inbox. Each role persists its own list; lists never
/// cross-contaminate.
pub struct NotificationStore<'a> {
    store: &'a LocalStore,
    role: String,
    key: String,
    items: Vec<Notification>,
}

impl<'a> NotificationStore<'a> {
    /// Loads the role's list, seeding (and persisting the seed) when nothing
    /// usable is stored.
    pub fn load(role: &str, store: &'a LocalStore) -> Self {
        let key = keys::notifications(role);
        let items = match store.read_json::<Vec<Notification>>(&key) {
            Some(items) => items,
            None => {
                let seeded = seed_for_role(role, Utc::now());
                store.write_json(&key, &seeded);
                seeded
            }
        };
        Self {
            store,
            role: role.to_string(),
            key,
            items,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Recomputed on every call, never cached.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// Accepts an event addressed to this role (or to no role in particular)
    /// and prepends it. Events targeting a different role are ignored.
    /// Returns whether the event was taken.
    pub fn receive(&mut self, event: &NotificationEvent) -> bool {
        if let Some(target) = &event.role {
            if target != &self.role {
                debug!(role = %self.role, target = %target, "event for another role, ignoring");
                return false;
            }
        }
        let notification = event.notification.clone().into_notification(Utc::now());
        self.items.insert(0, notification);
        self.persist();
        true
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.read = true;
        self.persist();
        true
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
        self.persist();
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        self.store.write_json(&self.key, &self.items);
    }
}

/// Explicit publish/subscribe channel between components: stores register
/// once and every published event is offered to each of them in registration
/// order.
pub struct NotificationHub<'a> {
    stores: Vec<NotificationStore<'a>>,
}

impl<'a> NotificationHub<'a> {
    pub fn new() -> Self {
        Self { stores: Vec::new() }
    }

    /// Hub with every known role's store loaded.
    pub fn with_all_roles(store: &'a LocalStore) -> Self {
        let mut hub = Self::new();
        for role in ROLES {
            hub.register(NotificationStore::load(role, store));
        }
        hub
    }

    pub fn register(&mut self, store: NotificationStore<'a>) {
        self.stores.push(store);
    }

    /// Delivers to every matching store; returns how many accepted the event.
    pub fn publish(&mut self, event: &NotificationEvent) -> usize {
        self.stores
            .iter_mut()
            .map(|store| store.receive(event))
            .filter(|taken| *taken)
            .count()
    }

    pub fn store(&self, role: &str) -> Option<&NotificationStore<'a>> {
        self.stores.iter().find(|store| store.role() == role)
    }

    pub fn store_mut(&mut self, role: &str) -> Option<&mut NotificationStore<'a>> {
        self.stores.iter_mut().find(|store| store.role() == role)
    }
}

impl Default for NotificationHub<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationDraft;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        (tmp, store)
    }

    fn sample_event(role: Option<&str>) -> NotificationEvent {
        NotificationEvent {
            role: role.map(str::to_string),
            notification: NotificationDraft {
                id: None,
                title: "Shortlisted".to_string(),
                description: Some("You made the cut".to_string()),
                kind: NotificationKind::Success,
            },
        }
    }

    #[test]
    fn seeding_is_deterministic_per_role() {
        let (_tmp, store) = temp_store();
        let first = NotificationStore::load("employer", &store);
        let first_ids: Vec<String> = first.items().iter().map(|n| n.id.clone()).collect();

        store.remove(&keys::notifications("employer"));
        let second = NotificationStore::load("employer", &store);
        let second_ids: Vec<String> = second.items().iter().map(|n| n.id.clone()).collect();

        assert_eq!(first_ids.len(), 2);
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn seeds_are_unread_and_most_recent_first() {
        let (_tmp, store) = temp_store();
        let inbox = NotificationStore::load("student", &store);
        assert_eq!(inbox.items().len(), 14);
        assert_eq!(inbox.unread_count(), inbox.items().len());
        for pair in inbox.items().windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
    }

    #[test]
    fn unknown_role_seeds_empty() {
        let (_tmp, store) = temp_store();
        let inbox = NotificationStore::load("registrar", &store);
        assert!(inbox.items().is_empty());
    }

    #[test]
    fn seed_is_persisted_immediately() {
        let (_tmp, store) = temp_store();
        let _inbox = NotificationStore::load("faculty", &store);
        let raw = store.read(&keys::notifications("faculty"));
        assert!(raw.is_some());
    }

    #[test]
    fn receive_prepends_and_generates_an_id() {
        let (_tmp, store) = temp_store();
        let mut inbox = NotificationStore::load("student", &store);
        let before = inbox.items().len();
        assert!(inbox.receive(&sample_event(Some("student"))));
        assert_eq!(inbox.items().len(), before + 1);
        assert_eq!(inbox.items()[0].title, "Shortlisted");
        assert!(!inbox.items()[0].id.is_empty());
    }

    #[test]
    fn receive_ignores_events_for_other_roles() {
        let (_tmp, store) = temp_store();
        let mut inbox = NotificationStore::load("student", &store);
        let before = inbox.items().len();
        assert!(!inbox.receive(&sample_event(Some("faculty"))));
        assert_eq!(inbox.items().len(), before);
    }

    #[test]
    fn receive_accepts_roleless_broadcasts() {
        let (_tmp, store) = temp_store();
        let mut inbox = NotificationStore::load("employer", &store);
        assert!(inbox.receive(&sample_event(None)));
    }

    #[test]
    fn mark_all_read_zeroes_unread_count() {
        let (_tmp, store) = temp_store();
        let mut inbox = NotificationStore::load("student", &store);
        assert!(inbox.unread_count() > 0);
        inbox.mark_all_read();
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn mark_read_flags_a_single_entry() {
        let (_tmp, store) = temp_store();
        let mut inbox = NotificationStore::load("employer", &store);
        let id = inbox.items()[0].id.clone();
        assert!(inbox.mark_read(&id));
        assert_eq!(inbox.unread_count(), inbox.items().len() - 1);
        assert!(!inbox.mark_read("no-such-id"));
    }

    #[test]
    fn clear_all_empties_and_persists() {
        let (_tmp, store) = temp_store();
        let mut inbox = NotificationStore::load("employer", &store);
        inbox.clear_all();
        assert!(inbox.items().is_empty());

        let reloaded: Vec<Notification> = store
            .read_json(&keys::notifications("employer"))
            .unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn role_lists_do_not_cross_contaminate() {
        let (_tmp, store) = temp_store();
        let mut student = NotificationStore::load("student", &store);
        let faculty_before = NotificationStore::load("faculty", &store).items().len();
        student.receive(&sample_event(Some("student")));

        let faculty = NotificationStore::load("faculty", &store);
        assert_eq!(faculty.items().len(), faculty_before);
    }

    #[test]
    fn hub_delivers_to_matching_roles_only() {
        let (_tmp, store) = temp_store();
        let mut hub = NotificationHub::with_all_roles(&store);
        let faculty_before = hub.store("faculty").unwrap().items().len();
        let student_before = hub.store("student").unwrap().items().len();

        assert_eq!(hub.publish(&sample_event(Some("faculty"))), 1);
        assert_eq!(
            hub.store("faculty").unwrap().items().len(),
            faculty_before + 1
        );
        assert_eq!(hub.store("student").unwrap().items().len(), student_before);

        assert_eq!(hub.publish(&sample_event(None)), ROLES.len());
        assert_eq!(hub.publish(&sample_event(Some("alumni"))), 0);
    }

    #[test]
    fn malformed_persisted_list_reseeds() {
        let (_tmp, store) = temp_store();
        store.write(&keys::notifications("faculty"), "not json at all");
        let inbox = NotificationStore::load("faculty", &store);
        assert_eq!(inbox.items().len(), 2);
    }
}
