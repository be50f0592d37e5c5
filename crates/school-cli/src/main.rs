//! Command-line front end for the student record store.
//!
//! Each invocation runs one operation against the store file and exits.
//! Input validation (secret confirmation, score range) happens here, before
//! the store is called.

use anyhow::{Context, Result, anyhow, bail};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use school_common::prelude::*;
use school_store::{
    JsonStorage, NewStudent, OverallAverage, RecordStore, ScoreKind, StudentRecord,
    normalize_subject,
};
use std::fmt::Write as _;

#[derive(Debug, Parser)]
#[command(name = "school", version, about = "Student records and grades")]
struct Cli {
    /// Store file (defaults to $SCHOOL_DB_PATH, then ~/DATABASE.json)
    #[arg(long, global = true)]
    db: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enroll a new student and print the generated id
    Enroll {
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        sex: String,
        #[arg(long = "class")]
        class_name: String,
        #[arg(long)]
        secret: String,
        #[arg(long)]
        confirm_secret: String,
    },
    /// Check credentials
    Login {
        #[command(flatten)]
        auth: Credentials,
    },
    /// Record a quiz or homework score (0-20)
    AddScore {
        #[command(flatten)]
        auth: Credentials,
        #[arg(long)]
        subject: String,
        #[arg(long, allow_hyphen_values = true)]
        score: String,
        /// quiz or homework
        #[arg(long)]
        kind: ScoreKind,
    },
    /// Compute and store the overall average for a subject
    Average {
        #[command(flatten)]
        auth: Credentials,
        #[arg(long)]
        subject: String,
    },
    /// Print the grade report
    Show {
        #[command(flatten)]
        auth: Credentials,
        /// Only this subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Delete the account
    Unenroll {
        #[command(flatten)]
        auth: Credentials,
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct Credentials {
    #[arg(long)]
    id: String,
    #[arg(long)]
    secret: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let path = cli.db.unwrap_or_else(JsonStorage::default_path);
    tracing::debug!(path = %path, "Opening store");
    let store = RecordStore::new(JsonStorage::new(path));

    run(&store, cli.command)
}

fn run(store: &RecordStore, command: Command) -> Result<()> {
    match command {
        Command::Enroll {
            last_name,
            first_name,
            age,
            sex,
            class_name,
            secret,
            confirm_secret,
        } => {
            if !secrets_match(&confirm_secret, &secret) {
                bail!("secrets do not match");
            }
            let id = new_student_id();
            let student = NewStudent {
                last_name,
                first_name,
                age,
                sex,
                class_name,
                secret,
            };
            store.enroll(student, &id).context("Enrollment failed")?;
            println!("{}", id);
        }
        Command::Login { auth } => {
            let record = authenticated(store, &auth)?;
            println!("Welcome, {} {}", record.first_name, record.last_name);
        }
        Command::AddScore {
            auth,
            subject,
            score,
            kind,
        } => {
            authenticated(store, &auth)?;
            let score = parse_score(&score)?;
            let grades = store
                .add_score(&auth.id, &subject, score, kind)
                .context("Failed to record score")?;
            println!(
                "Recorded {} score {} in {} ({} average: {})",
                kind,
                score,
                normalize_subject(&subject),
                kind,
                format_average(grades.average(kind))
            );
        }
        Command::Average { auth, subject } => {
            authenticated(store, &auth)?;
            let subject = normalize_subject(&subject);
            match store
                .compute_overall_average(&auth.id, &subject)
                .context("Failed to store overall average")?
            {
                OverallAverage::Computed(average) => {
                    println!("{} overall average: {:.2}/20", subject, average);
                }
                OverallAverage::NoScores => bail!("no scores recorded in {}", subject),
                OverallAverage::NotFound => bail!("no subject {} on this record", subject),
            }
        }
        Command::Show { auth, subject } => {
            let record = authenticated(store, &auth)?;
            print!("{}", render_report(&record, subject.as_deref()));
        }
        Command::Unenroll { auth, yes } => {
            authenticated(store, &auth)?;
            if !yes {
                bail!("refusing to delete without --yes");
            }
            store.unenroll(&auth.id).context("Failed to delete account")?;
            println!("Account deleted.");
        }
    }
    Ok(())
}

/// Fetch the record if the credentials match.
fn authenticated(store: &RecordStore, auth: &Credentials) -> Result<StudentRecord> {
    store
        .authenticate(&auth.id, &auth.secret)
        .ok_or_else(|| anyhow!("invalid credentials"))
}

fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{:.2}/20", value),
        None => "N/A".to_string(),
    }
}

/// Grade report for a record, optionally for one subject.
fn render_report(record: &StudentRecord, subject: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Grade report: {} {}",
        record.first_name, record.last_name
    );

    if record.grades.is_empty() {
        out.push_str("No grades recorded yet.\n");
        return out;
    }

    let mut found = false;
    for (name, grades) in record.subjects(subject) {
        found = true;
        let _ = writeln!(out, "{}", name);
        let _ = writeln!(
            out,
            "  Quiz scores: {:?} (average: {})",
            grades.quiz_scores,
            format_average(grades.quiz_average)
        );
        let _ = writeln!(
            out,
            "  Homework scores: {:?} (average: {})",
            grades.homework_scores,
            format_average(grades.homework_average)
        );
        if let Some(overall) = grades.overall_average {
            let _ = writeln!(out, "  Overall average: {:.2}/20", overall);
        }
    }

    if !found {
        let _ = writeln!(
            out,
            "No grades found for subject: {}",
            normalize_subject(subject.unwrap_or_default())
        );
    }
    out
}
