//! The built-in six-listing data set.

use crate::error::Result;
use crate::job::Job;
use crate::source::parse_jobs;

const SAMPLE_JOBS_JSON: &str = include_str!("../data/sample_jobs.json");

/// Returns the sample listings in their original order.
pub fn sample_jobs() -> Result<Vec<Job>> {
    parse_jobs(SAMPLE_JOBS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_loads() {
        let jobs = sample_jobs().unwrap();
        assert_eq!(jobs.len(), 6);
        assert_eq!(jobs[0].title, "Senior Frontend Developer");
        assert_eq!(jobs[5].title, "Marketing Intern");
    }
}
