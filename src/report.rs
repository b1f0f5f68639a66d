use std::fmt::Write;

use crate::lifecycle::{self, PENDING_STATUSES};
use crate::models::{Application, Profile};

#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub status: String,
    pub label: String,
    pub count: usize,
}

pub fn summarize_by_status(applications: &[Application]) -> Vec<StatusSummary> {
    let mut map: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for application in applications {
        *map.entry(application.status.clone()).or_insert(0) += 1;
    }

    let mut summaries: Vec<StatusSummary> = map
        .into_iter()
        .map(|(status, count)| StatusSummary {
            label: lifecycle::status_info(&status).label,
            status,
            count,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    summaries
}

pub fn build_report(profile: &Profile, completion: u8, applications: &[Application]) -> String {
    let summaries = summarize_by_status(applications);
    let pending = applications
        .iter()
        .filter(|a| PENDING_STATUSES.contains(&a.status.as_str()))
        .count();
    let offers = applications.iter().filter(|a| a.status == "offer").count();
    let rejected = applications
        .iter()
        .filter(|a| a.status == "rejected")
        .count();

    let mut output = String::new();

    let _ = writeln!(output, "# Placement Report");
    let _ = writeln!(
        output,
        "Generated for {} ({})",
        profile.personal_info.name, profile.personal_info.department
    );
    let _ = writeln!(output, "Profile completion: {completion}%");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Application Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No applications tracked yet.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(output, "- {}: {}", summary.label, summary.count);
        }
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "{} total, {pending} in progress, {offers} offers, {rejected} rejected",
            applications.len()
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Applications");

    if applications.is_empty() {
        let _ = writeln!(output, "No applications tracked yet.");
    } else {
        for application in applications.iter().rev().take(5) {
            let next = if lifecycle::is_terminal(&application.status) {
                "closed".to_string()
            } else {
                format!("next: {}", application.next_step)
            };
            let _ = writeln!(
                output,
                "- {} at {} ({}) — {}, {}",
                application.position,
                application.company,
                application.location,
                lifecycle::status_info(&application.status).label,
                next
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineStep;
    use crate::student::default_profile;

    fn sample_application(id: &str, status: &str) -> Application {
        Application {
            id: id.to_string(),
            company: "Wipro".to_string(),
            position: "Backend Developer".to_string(),
            location: "Hyderabad, India".to_string(),
            stipend: "₹35,000/month".to_string(),
            status: status.to_string(),
            applied_date: "2025-09-01".to_string(),
            progress: 20,
            next_step: "Resume Review".to_string(),
            timeline: vec![TimelineStep {
                step: "Applied".to_string(),
                date: "2025-09-01".to_string(),
                completed: true,
            }],
            notes: String::new(),
            hr: None,
        }
    }

    #[test]
    fn summaries_count_per_status_most_common_first() {
        let applications = vec![
            sample_application("1", "applied"),
            sample_application("2", "applied"),
            sample_application("3", "offer"),
        ];
        let summaries = summarize_by_status(&applications);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].label, "Applied");
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[1].label, "Offer Received");
    }

    #[test]
    fn report_tallies_pending_offers_and_rejections() {
        let applications = vec![
            sample_application("1", "applied"),
            sample_application("2", "interview"),
            sample_application("3", "offer"),
            sample_application("4", "rejected"),
        ];
        let report = build_report(&default_profile(), 75, &applications);
        assert!(report.contains("Profile completion: 75%"));
        assert!(report.contains("4 total, 2 in progress, 1 offers, 1 rejected"));
    }

    #[test]
    fn report_lists_most_recent_applications_first() {
        let applications = vec![
            sample_application("1", "applied"),
            sample_application("2", "applied"),
        ];
        let mut newest = sample_application("3", "applied");
        newest.company = "Zoho".to_string();
        let applications = [applications, vec![newest]].concat();

        let report = build_report(&default_profile(), 50, &applications);
        let recent_section = report.split("## Recent Applications").nth(1).unwrap();
        let first_line = recent_section.lines().find(|l| l.starts_with('-')).unwrap();
        assert!(first_line.contains("Zoho"));
    }

    #[test]
    fn empty_list_renders_placeholders() {
        let report = build_report(&default_profile(), 0, &[]);
        assert!(report.contains("No applications tracked yet."));
    }
}
