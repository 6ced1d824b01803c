//! Shared helpers for the PostgreSQL-backed integration suites.
//!
//! Each suite boots an embedded cluster through [`cluster::test_cluster`],
//! creates a fresh database per test, applies the crate's embedded
//! migrations and seeds jobs with the `postgres` client so fixtures never go
//! through the adapters under test.

pub mod cluster;

use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE and server detail.
///
/// `Display` on `postgres::Error` often collapses to `db error`, which is
/// useless in CI output.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Whether `SKIP_TEST_CLUSTER` asks suites to skip instead of failing.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

/// Drop and recreate `name` through the maintenance database.
pub fn reset_database(admin_url: &str, name: &str) -> Result<(), String> {
    let mut client = connect(admin_url)?;
    let quoted = name.replace('"', "\"\"");
    client
        .batch_execute(&format!(
            r#"DROP DATABASE IF EXISTS "{quoted}" WITH (FORCE); CREATE DATABASE "{quoted}";"#
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Insert an open job owned by `employer_id`.
pub fn seed_job(url: &str, job_id: i64, employer_id: i64) -> Result<(), String> {
    let mut client = connect(url)?;
    client
        .execute(
            "INSERT INTO jobs (id, employer_id, status) VALUES ($1, $2, 'open')",
            &[&job_id, &employer_id],
        )
        .map(|_| ())
        .map_err(|err| format_postgres_error(&err))
}

/// Stored status literal of a job.
pub fn job_status(url: &str, job_id: i64) -> Result<String, String> {
    let mut client = connect(url)?;
    client
        .query_one("SELECT status FROM jobs WHERE id = $1", &[&job_id])
        .map(|row| row.get(0))
        .map_err(|err| format_postgres_error(&err))
}

/// Number of match rows for a `(student, employer, job)` triple and how many
/// of them carry `is_match`.
pub fn match_row_counts(
    url: &str,
    student_id: i64,
    employer_id: i64,
    job_id: i64,
) -> Result<(i64, i64), String> {
    let mut client = connect(url)?;
    client
        .query_one(
            concat!(
                "SELECT count(*), count(*) FILTER (WHERE is_match) FROM matches ",
                "WHERE student_id = $1 AND employer_id = $2 AND job_id = $3"
            ),
            &[&student_id, &employer_id, &job_id],
        )
        .map(|row| (row.get(0), row.get(1)))
        .map_err(|err| format_postgres_error(&err))
}
