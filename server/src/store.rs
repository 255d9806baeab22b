//! In-memory job store backing the API.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use common::error::{BoardError, Result};
use common::sample::sample_jobs;
use common::source::load_jobs;
use common::{Job, NewJob};

#[derive(Debug, Default)]
pub struct JobStore {
    jobs: Vec<Job>,
    last_generated_id: i64,
}

impl JobStore {
    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            last_generated_id: 0,
        }
    }

    /// Loads `path`, or the sample set when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let jobs = if path.exists() {
            tracing::info!(path = %path.display(), "📂 Loading jobs");
            load_jobs(path)?
        } else {
            tracing::warn!(path = %path.display(), "No jobs file found, serving sample listings");
            sample_jobs()?
        };
        tracing::info!(count = jobs.len(), "📊 Loaded jobs");
        Ok(Self::from_jobs(jobs))
    }

    pub fn all(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Job> {
        self.jobs
            .iter()
            .find(|job| job.id == id)
            .ok_or_else(|| BoardError::JobNotFound(id.to_string()))
    }

    /// Validates and stores a posting, returning the stored listing.
    pub fn insert(&mut self, new_job: NewJob, posted: NaiveDate) -> Result<Job> {
        // Checked before `next_id` so a rejected posting does not use up an id.
        new_job.validate()?;
        let id = self.next_id();
        let job = new_job.into_job(id, posted)?;
        self.jobs.push(job.clone());
        tracing::info!(job_id = %job.id, title = %job.title, "Posted job");
        Ok(job)
    }

    /// Millisecond timestamp, bumped past the last one issued and any
    /// existing id so two postings in the same millisecond stay distinct.
    fn next_id(&mut self) -> String {
        let mut candidate = Utc::now().timestamp_millis().max(self.last_generated_id + 1);
        while self.jobs.iter().any(|job| job.id == candidate.to_string()) {
            candidate += 1;
        }
        self.last_generated_id = candidate;
        candidate.to_string()
    }
}
