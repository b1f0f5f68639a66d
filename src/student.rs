use crate::models::{
    Application, ApplicationPatch, PersonalInfo, Profile, Resume, StudentStats,
};
use crate::storage::{keys, LocalStore};

pub const DEFAULT_AVATAR: &str = "/assets/user_default.jpg";

/// Profile completion score, 0..=100. Four checks worth 25 points each:
/// contact details filled in, at least one skill, a cover letter, and a
/// non-placeholder avatar. Pure function of the profile.
pub fn profile_completion(profile: &Profile) -> u8 {
    let info = &profile.personal_info;
    let mut completed = 0u32;
    if !info.name.trim().is_empty()
        && !info.email.trim().is_empty()
        && !info.phone.trim().is_empty()
    {
        completed += 1;
    }
    if !profile.skills.is_empty() {
        completed += 1;
    }
    if !profile.cover_letter.trim().is_empty() {
        completed += 1;
    }
    if !info.avatar.is_empty() && !info.avatar.contains("user_default.jpg") {
        completed += 1;
    }
    ((completed as f64 / 4.0) * 100.0).round() as u8
}

pub fn default_profile() -> Profile {
    Profile {
        personal_info: PersonalInfo {
            name: "Aarav Sharma".to_string(),
            email: "aarav.sharma@university.ac.in".to_string(),
            phone: "+91 98765 43210".to_string(),
            department: "Computer Science".to_string(),
            year: "Final Year".to_string(),
            gpa: "8.2".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        },
        skills: vec![
            "JavaScript".to_string(),
            "React".to_string(),
            "Node.js".to_string(),
            "Python".to_string(),
            "SQL".to_string(),
            "Git".to_string(),
        ],
        resume: Resume {
            filename: "Aarav_Sharma_Resume.pdf".to_string(),
            upload_date: "2025-08-20".to_string(),
        },
        cover_letter: "Dear Hiring Manager,\n\n\
            I am writing to express my interest in the Software Engineering Intern \
            position. I am a final-year Computer Science undergraduate from India with \
            hands-on experience building full\u{2011}stack applications using React, \
            Node.js and modern tooling.\n\n\
            Across national hackathons, open-source contributions and internships with \
            early\u{2011}stage startups, I have learned to deliver clean, maintainable \
            code while collaborating across design and product functions. I mentor \
            juniors in data structures and system design which keeps my fundamentals \
            strong.\n\n\
            Your organisation's focus on scalable digital solutions for diverse users \
            aligns with my goal of building impactful technology for India at scale. I \
            believe my technical depth, curiosity and collaborative approach would \
            allow me to contribute meaningfully.\n\n\
            Thank you for considering my application. I look forward to the \
            possibility of contributing to your team.\n\n\
            Sincerely,\nAarav Sharma"
            .to_string(),
        email_notifications: true,
        dark_mode: false,
    }
}

/// Single source of truth for one student's profile, application list, and
/// derived statistics. All mutations persist immediately; loads fall back to
/// seeded defaults when nothing (or something undecodable) is stored.
pub struct StudentStore<'a> {
    store: &'a LocalStore,
    profile: Profile,
    applications: Vec<Application>,
    stats: StudentStats,
    profile_completion: u8,
}

impl<'a> StudentStore<'a> {
    /// Reads profile, applications, and stats. Defaults are not written back
    /// on load; the profile-completion cache is the one exception and is
    /// refreshed on every load and every profile change.
    pub fn load(store: &'a LocalStore) -> Self {
        let profile: Profile = store
            .read_json(keys::STUDENT_PROFILE)
            .unwrap_or_else(default_profile);
        let applications: Vec<Application> = store
            .read_json(keys::STUDENT_APPLICATIONS)
            .unwrap_or_default();
        let mut stats: StudentStats = store.read_json(keys::STUDENT_STATS).unwrap_or_default();
        stats.applications = applications.len();

        let completion = profile_completion(&profile);
        store.write(keys::PROFILE_COMPLETION, &completion.to_string());

        Self {
            store,
            profile,
            applications,
            stats,
            profile_completion: completion,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn stats(&self) -> &StudentStats {
        &self.stats
    }

    pub fn profile_completion_score(&self) -> u8 {
        self.profile_completion
    }

    /// Wholesale profile replacement; persists and recomputes completion.
    pub fn set_profile(&mut self, next: Profile) {
        self.profile = next;
        self.store.write_json(keys::STUDENT_PROFILE, &self.profile);
        self.profile_completion = profile_completion(&self.profile);
        self.store
            .write(keys::PROFILE_COMPLETION, &self.profile_completion.to_string());
    }

    /// Inserts an application unless one with the same id already exists.
    /// Returns whether the list changed.
    pub fn add_application(&mut self, application: Application) -> bool {
        if self.applications.iter().any(|a| a.id == application.id) {
            return false;
        }
        self.applications.push(application);
        self.persist_applications();
        true
    }

    /// Merges a partial update into the application matching `id`; silent
    /// no-op when the id is unknown. Returns whether a record matched.
    pub fn update_application(&mut self, id: &str, patch: ApplicationPatch) -> bool {
        let Some(application) = self.applications.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if let Some(status) = patch.status {
            application.status = status;
        }
        if let Some(progress) = patch.progress {
            application.progress = progress;
        }
        if let Some(next_step) = patch.next_step {
            application.next_step = next_step;
        }
        if let Some(notes) = patch.notes {
            application.notes = notes;
        }
        if let Some(timeline) = patch.timeline {
            application.timeline = timeline;
        }
        if let Some(hr) = patch.hr {
            application.hr = Some(hr);
        }
        self.persist_applications();
        true
    }

    /// Last three applications, most recently added first.
    pub fn recent_applications(&self) -> Vec<&Application> {
        self.applications.iter().rev().take(3).collect()
    }

    fn persist_applications(&mut self) {
        self.stats.applications = self.applications.len();
        self.store
            .write_json(keys::STUDENT_APPLICATIONS, &self.applications);
    }
}
