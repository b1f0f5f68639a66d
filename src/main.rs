use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};

mod jobs;
mod lifecycle;
mod models;
mod notify;
mod report;
mod storage;
mod student;

use models::{ApplicationPatch, NotificationDraft, NotificationEvent, NotificationKind};
use notify::{NotificationHub, NotificationStore};
use storage::{keys, LocalStore};
use student::StudentStore;

#[derive(Parser)]
#[command(name = "campusconnect")]
#[command(about = "Campus placement tracker for CampusConnect", long_about = None)]
struct Cli {
    /// Data directory; defaults to $CAMPUSCONNECT_DATA_DIR or the per-user
    /// data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the default profile, mock job postings, and role inboxes
    Seed,
    /// Show or edit the student profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// List the stored job postings
    Jobs,
    /// Import job postings from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Apply to a job posting and start tracking the application
    Apply {
        #[arg(long)]
        job: String,
    },
    /// Inspect or update tracked applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommands,
    },
    /// Manage a role's notification inbox
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Publish a notification through the hub
    Notify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum, default_value_t = NotificationKind::Info)]
        kind: NotificationKind,
        /// Target role; omit to broadcast to every inbox
        #[arg(long)]
        role: Option<String>,
    },
    /// Generate a markdown placement report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        gpa: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        /// Replaces the whole skill list when given at least once
        #[arg(long = "skill")]
        skills: Vec<String>,
        #[arg(long)]
        cover_letter_file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ApplicationCommands {
    List {
        #[arg(long)]
        status: Option<String>,
    },
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        progress: Option<u8>,
        #[arg(long)]
        next_step: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum NotificationCommands {
    List {
        #[arg(long)]
        role: String,
    },
    #[command(group(
        ArgGroup::new("target")
            .args(["id", "all"])
            .required(true)
    ))]
    Read {
        #[arg(long)]
        role: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        all: bool,
    },
    Clear {
        #[arg(long)]
        role: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os("CAMPUSCONNECT_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(LocalStore::default_dir);
    let store = LocalStore::open(&data_dir);

    match cli.command {
        Commands::Seed => {
            if store.read(keys::STUDENT_PROFILE).is_none() {
                store.write_json(keys::STUDENT_PROFILE, &student::default_profile());
            }
            if store.read(keys::JOBS).is_none() {
                jobs::save(&store, &jobs::seed_postings());
            }
            for role in notify::ROLES {
                let _ = NotificationStore::load(role, &store);
            }
            println!("Seed data ready in {}.", store.dir().display());
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Show => {
                let student = StudentStore::load(&store);
                let profile = student.profile();
                let info = &profile.personal_info;
                println!("{} <{}> {}", info.name, info.email, info.phone);
                println!("{}, {}, GPA {}", info.department, info.year, info.gpa);
                println!("Skills: {}", profile.skills.join(", "));
                println!(
                    "Resume: {} (uploaded {})",
                    profile.resume.filename, profile.resume.upload_date
                );
                println!(
                    "Profile completion: {}%",
                    student.profile_completion_score()
                );
                let stats = student.stats();
                println!(
                    "Applications: {} | Interviews: {} | Offers: {} | Profile views: {}",
                    stats.applications, stats.interviews, stats.offers, stats.profile_views
                );
            }
            ProfileCommands::Set {
                name,
                email,
                phone,
                department,
                year,
                gpa,
                avatar,
                skills,
                cover_letter_file,
            } => {
                let mut student = StudentStore::load(&store);
                let mut next = student.profile().clone();
                if let Some(name) = name {
                    next.personal_info.name = name;
                }
                if let Some(email) = email {
                    next.personal_info.email = email;
                }
                if let Some(phone) = phone {
                    next.personal_info.phone = phone;
                }
                if let Some(department) = department {
                    next.personal_info.department = department;
                }
                if let Some(year) = year {
                    next.personal_info.year = year;
                }
                if let Some(gpa) = gpa {
                    next.personal_info.gpa = gpa;
                }
                if let Some(avatar) = avatar {
                    next.personal_info.avatar = avatar;
                }
                if !skills.is_empty() {
                    next.skills = skills;
                }
                if let Some(path) = cover_letter_file {
                    next.cover_letter = std::fs::read_to_string(&path)
                        .with_context(|| format!("could not read {}", path.display()))?;
                }
                student.set_profile(next);
                println!(
                    "Profile saved. Completion: {}%.",
                    student.profile_completion_score()
                );
            }
        },
        Commands::Jobs => {
            let jobs = jobs::load(&store);
            if jobs.is_empty() {
                println!("No job postings stored. Run `campusconnect seed` first.");
            } else {
                for job in jobs.iter() {
                    println!(
                        "[{}] {} at {} ({}) — {}, deadline {}",
                        job.id, job.title, job.company, job.location, job.stipend, job.deadline
                    );
                }
            }
        }
        Commands::Import { csv } => {
            let inserted = jobs::import_csv(&store, &csv)?;
            println!("Inserted {inserted} job postings from {}.", csv.display());
        }
        Commands::Apply { job } => {
            let postings = jobs::load(&store);
            let posting = jobs::find(&postings, &job)
                .with_context(|| format!("no job posting with id {job}"))?;
            let application = jobs::application_from_posting(posting, chrono::Utc::now());
            let mut student = StudentStore::load(&store);
            if student.add_application(application) {
                println!("Application submitted for {} at {}.", posting.title, posting.company);
            } else {
                println!("Already applied to job {job}; nothing changed.");
            }
        }
        Commands::Applications { command } => match command {
            ApplicationCommands::List { status } => {
                let student = StudentStore::load(&store);
                let applications: Vec<_> = student
                    .applications()
                    .iter()
                    .filter(|a| status.as_deref().map_or(true, |s| a.status == s))
                    .collect();
                if applications.is_empty() {
                    println!("No applications tracked for this filter.");
                } else {
                    for application in applications {
                        let info = lifecycle::status_info(&application.status);
                        println!(
                            "[{}] {} at {} — {} ({}%), next: {}",
                            application.id,
                            application.position,
                            application.company,
                            info.label,
                            application.progress,
                            application.next_step
                        );
                    }
                }
            }
            ApplicationCommands::Update {
                id,
                status,
                progress,
                next_step,
                notes,
            } => {
                let mut student = StudentStore::load(&store);
                let patch = ApplicationPatch {
                    status,
                    progress,
                    next_step,
                    notes,
                    ..Default::default()
                };
                if student.update_application(&id, patch) {
                    println!("Application {id} updated.");
                } else {
                    println!("No application with id {id}; nothing changed.");
                }
            }
        },
        Commands::Notifications { command } => match command {
            NotificationCommands::List { role } => {
                let inbox = NotificationStore::load(&role, &store);
                println!("{} unread of {}", inbox.unread_count(), inbox.items().len());
                for item in inbox.items() {
                    let marker = if item.read { " " } else { "*" };
                    let description = item.description.as_deref().unwrap_or("");
                    println!("{marker} [{}] {} — {}", item.id, item.title, description);
                }
            }
            NotificationCommands::Read { role, id, all } => {
                let mut inbox = NotificationStore::load(&role, &store);
                if all {
                    inbox.mark_all_read();
                    println!("All {role} notifications marked read.");
                } else if let Some(id) = id {
                    if inbox.mark_read(&id) {
                        println!("Notification {id} marked read.");
                    } else {
                        println!("No notification with id {id}; nothing changed.");
                    }
                }
            }
            NotificationCommands::Clear { role } => {
                let mut inbox = NotificationStore::load(&role, &store);
                inbox.clear_all();
                println!("Cleared the {role} inbox.");
            }
        },
        Commands::Notify {
            title,
            description,
            kind,
            role,
        } => {
            let mut hub = NotificationHub::with_all_roles(&store);
            let delivered = hub.publish(&NotificationEvent {
                role,
                notification: NotificationDraft {
                    id: None,
                    title,
                    description,
                    kind,
                },
            });
            println!("Delivered to {delivered} inbox(es).");
        }
        Commands::Report { out } => {
            let student = StudentStore::load(&store);
            let report = report::build_report(
                student.profile(),
                student.profile_completion_score(),
                student.applications(),
            );
            std::fs::write(&out, report)
                .with_context(|| format!("could not write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
