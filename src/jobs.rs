use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::models::{Application, JobPosting, TimelineStep};
use crate::storage::{keys, LocalStore};

pub fn load(store: &LocalStore) -> Vec<JobPosting> {
    store.read_json(keys::JOBS).unwrap_or_default()
}

pub fn save(store: &LocalStore, jobs: &[JobPosting]) {
    store.write_json(keys::JOBS, &jobs);
}

pub fn find<'a>(jobs: &'a [JobPosting], id: &str) -> Option<&'a JobPosting> {
    jobs.iter().find(|job| job.id == id)
}

/// Mock postings written on `seed` when no list is stored yet.
pub fn seed_postings() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: "101".to_string(),
            title: "Software Developer Intern".to_string(),
            company: "Infosys".to_string(),
            location: "Bangalore, India".to_string(),
            kind: "internship".to_string(),
            stipend: "₹25,000/month".to_string(),
            duration: "6 months".to_string(),
            posted: "2025-08-01".to_string(),
            deadline: "2025-09-15".to_string(),
            description: "Work on real-world projects with Infosys digital team.".to_string(),
            requirements: vec![
                "Java".to_string(),
                "Spring Boot".to_string(),
                "SQL".to_string(),
            ],
        },
        JobPosting {
            id: "102".to_string(),
            title: "Data Analyst".to_string(),
            company: "Tata Consultancy Services".to_string(),
            location: "Mumbai, India".to_string(),
            kind: "placement".to_string(),
            stipend: "₹40,000/month".to_string(),
            duration: "Full-time".to_string(),
            posted: "2025-07-20".to_string(),
            deadline: "2025-09-10".to_string(),
            description: "Analyze business data for TCS clients.".to_string(),
            requirements: vec![
                "Python".to_string(),
                "Excel".to_string(),
                "Power BI".to_string(),
            ],
        },
    ]
}

/// Imports postings from a CSV file, skipping rows whose id is already
/// stored. Returns the number of postings inserted. The `requirements`
/// column is a semicolon-separated list.
pub fn import_csv(store: &LocalStore, csv_path: &Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: String,
        title: String,
        company: String,
        location: String,
        #[serde(rename = "type")]
        kind: String,
        stipend: String,
        duration: String,
        posted: String,
        deadline: String,
        description: String,
        requirements: String,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("could not open {}", csv_path.display()))?;
    let mut jobs = load(store);
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        if jobs.iter().any(|job| job.id == row.id) {
            continue;
        }
        jobs.push(JobPosting {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            kind: row.kind,
            stipend: row.stipend,
            duration: row.duration,
            posted: row.posted,
            deadline: row.deadline,
            description: row.description,
            requirements: row
                .requirements
                .split(';')
                .map(str::trim)
                .filter(|req| !req.is_empty())
                .map(str::to_string)
                .collect(),
        });
        inserted += 1;
    }

    save(store, &jobs);
    Ok(inserted)
}

/// Builds the tracked application created when a student applies to a
/// posting: freshly applied, 10% progress, resume review up next, one
/// completed timeline step.
pub fn application_from_posting(job: &JobPosting, now: DateTime<Utc>) -> Application {
    let applied_date = now.to_rfc3339();
    Application {
        id: job.id.clone(),
        company: job.company.clone(),
        position: job.title.clone(),
        location: job.location.clone(),
        stipend: job.stipend.clone(),
        status: "applied".to_string(),
        applied_date: applied_date.clone(),
        progress: 10,
        next_step: "Resume Review".to_string(),
        timeline: vec![TimelineStep {
            step: "Applied".to_string(),
            date: applied_date,
            completed: true,
        }],
        notes: String::new(),
        hr: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        (tmp, store)
    }

    const CSV_HEADER: &str =
        "id,title,company,location,type,stipend,duration,posted,deadline,description,requirements";

    #[test]
    fn import_inserts_new_rows_and_skips_known_ids() {
        let (_tmp, store) = temp_store();
        save(&store, &seed_postings());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{CSV_HEADER}").unwrap();
        writeln!(
            file,
            "101,Software Developer Intern,Infosys,\"Bangalore, India\",internship,x,x,x,x,dup,Java"
        )
        .unwrap();
        writeln!(
            file,
            "103,Frontend Intern,Zoho,\"Chennai, India\",internship,₹20000/month,3 months,2025-08-10,2025-09-20,Build dashboards.,React; CSS"
        )
        .unwrap();

        let inserted = import_csv(&store, file.path()).unwrap();
        assert_eq!(inserted, 1);

        let jobs = load(&store);
        assert_eq!(jobs.len(), 3);
        let added = find(&jobs, "103").unwrap();
        assert_eq!(added.requirements, vec!["React", "CSS"]);
    }

    #[test]
    fn import_fails_with_context_for_missing_file() {
        let (_tmp, store) = temp_store();
        let err = import_csv(&store, Path::new("/no/such/file.csv")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.csv"));
    }

    #[test]
    fn applying_builds_a_freshly_tracked_application() {
        let job = &seed_postings()[0];
        let app = application_from_posting(job, Utc::now());
        assert_eq!(app.id, job.id);
        assert_eq!(app.position, job.title);
        assert_eq!(app.status, "applied");
        assert_eq!(app.progress, 10);
        assert_eq!(app.next_step, "Resume Review");
        assert_eq!(app.timeline.len(), 1);
        assert!(app.timeline[0].completed);
        assert!(app.notes.is_empty());
    }
}
