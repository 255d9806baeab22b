//! Loading job records from JSON.
//!
//! Records are checked here, once, so that the query engine can assume
//! well-formed input.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{BoardError, Result};
use crate::job::Job;

/// Parses a JSON array of jobs and validates every record.
pub fn parse_jobs(json: &str) -> Result<Vec<Job>> {
    let jobs: Vec<Job> = serde_json::from_str(json)?;
    validate_jobs(&jobs)?;
    Ok(jobs)
}

/// Reads and parses a jobs file such as `data/jobs.json`.
pub fn load_jobs(path: &Path) -> Result<Vec<Job>> {
    let content = fs::read_to_string(path)?;
    let jobs = parse_jobs(&content)?;
    tracing::debug!(path = %path.display(), count = jobs.len(), "Loaded jobs file");
    Ok(jobs)
}

fn validate_jobs(jobs: &[Job]) -> Result<()> {
    let mut seen_ids = HashSet::new();
    for job in jobs {
        if job.salary_min > job.salary_max {
            return Err(BoardError::InvalidSalaryRange {
                min: job.salary_min,
                max: job.salary_max,
            });
        }
        if !seen_ids.insert(job.id.as_str()) {
            return Err(BoardError::DuplicateId(job.id.clone()));
        }
    }
    Ok(())
}
