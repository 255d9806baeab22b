//! Listing query engine.
//!
//! Filters a job collection by free text, location, job type, experience
//! level and salary range, then orders the survivors by one sort key. All
//! active filters must pass. The engine borrows the collection and never
//! reorders or mutates it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::BoardError;
use crate::job::{ExperienceLevel, Job, JobType};

/// Filter value that disables a categorical filter.
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Soonest deadline first.
    Deadline,
    /// Most recently posted first.
    Posted,
    /// Highest `salary_max` first.
    Salary,
}

impl SortKey {
    fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            SortKey::Deadline => a.deadline.cmp(&b.deadline),
            SortKey::Posted => b.posted_date.cmp(&a.posted_date),
            SortKey::Salary => b.salary_max.cmp(&a.salary_max),
        }
    }
}

impl FromStr for SortKey {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deadline" => Ok(SortKey::Deadline),
            "posted" => Ok(SortKey::Posted),
            "salary" => Ok(SortKey::Salary),
            other => Err(BoardError::UnknownVariant {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

/// Inclusive salary bounds.
///
/// Matching is containment: the job's whole `[salary_min, salary_max]` must
/// lie inside the bounds. A job that merely overlaps is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
}

impl SalaryRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Parses `"<min>-<max>"`, e.g. `"100000-150000"`.
    pub fn parse(raw: &str) -> Option<Self> {
        let re = Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").ok()?;
        let caps = re.captures(raw)?;
        let min = caps.get(1)?.as_str().parse().ok()?;
        let max = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { min, max })
    }

    pub fn contains(&self, job: &Job) -> bool {
        job.salary_min >= self.min && job.salary_max <= self.max
    }
}

/// Typed query for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Matched case-insensitively against title, company and description.
    pub term: String,
    /// Matched case-insensitively against location.
    pub location: String,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
    pub salary: Option<SalaryRange>,
    /// `None` keeps the filtered jobs in source order.
    pub sort: Option<SortKey>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            term: String::new(),
            location: String::new(),
            job_type: None,
            experience: None,
            salary: None,
            sort: Some(SortKey::Deadline),
        }
    }
}

impl QueryParams {
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    pub fn experience(mut self, level: ExperienceLevel) -> Self {
        self.experience = Some(level);
        self
    }

    pub fn salary(mut self, range: SalaryRange) -> Self {
        self.salary = Some(range);
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn unsorted(mut self) -> Self {
        self.sort = None;
        self
    }

    /// True when `job` passes every active filter.
    pub fn matches(&self, job: &Job) -> bool {
        self.matcher().matches(job)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            params: self,
            term: self.term.to_lowercase(),
            location: self.location.to_lowercase(),
        }
    }
}

/// Filters with the lowercased needles computed once per query.
struct Matcher<'a> {
    params: &'a QueryParams,
    term: String,
    location: String,
}

impl Matcher<'_> {
    fn matches(&self, job: &Job) -> bool {
        self.matches_term(job)
            && self.matches_location(job)
            && self.params.job_type.is_none_or(|t| job.job_type == t)
            && self.params.experience.is_none_or(|e| job.experience_level == e)
            && self.params.salary.is_none_or(|range| range.contains(job))
    }

    fn matches_term(&self, job: &Job) -> bool {
        self.term.is_empty()
            || job.title.to_lowercase().contains(&self.term)
            || job.company.to_lowercase().contains(&self.term)
            || job.description.to_lowercase().contains(&self.term)
    }

    fn matches_location(&self, job: &Job) -> bool {
        self.location.is_empty() || job.location.to_lowercase().contains(&self.location)
    }
}

/// Runs `params` against `jobs`.
///
/// The result borrows from `jobs`. Sorting is stable, so jobs with equal
/// keys keep their relative input order.
pub fn query<'a>(jobs: &'a [Job], params: &QueryParams) -> Vec<&'a Job> {
    let matcher = params.matcher();
    let mut results: Vec<&Job> = jobs.iter().filter(|job| matcher.matches(job)).collect();

    if let Some(key) = params.sort {
        results.sort_by(|a, b| key.compare(a, b));
    }

    results
}

/// Untyped query string as it arrives from a client.
///
/// Converting to [`QueryParams`] never fails: unknown enum values and
/// malformed salary ranges simply disable that filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    pub sort: Option<String>,
}

fn active_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && *value != ALL_SENTINEL)
}

fn parse_filter<T: FromStr>(raw: Option<&str>) -> Option<T> {
    active_filter(raw).and_then(|value| value.parse().ok())
}

impl From<&RawQuery> for QueryParams {
    fn from(raw: &RawQuery) -> Self {
        let sort = match raw.sort.as_deref().map(str::trim) {
            None | Some("") => Some(SortKey::Deadline),
            Some(value) => value.parse().ok(),
        };

        Self {
            term: raw.search.clone().unwrap_or_default(),
            location: raw.location.clone().unwrap_or_default(),
            job_type: parse_filter(raw.job_type.as_deref()),
            experience: parse_filter(raw.experience.as_deref()),
            salary: active_filter(raw.salary.as_deref()).and_then(SalaryRange::parse),
            sort,
        }
    }
}

impl From<RawQuery> for QueryParams {
    fn from(raw: RawQuery) -> Self {
        QueryParams::from(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_jobs;

    fn titles(jobs: &[&Job]) -> Vec<String> {
        jobs.iter().map(|job| job.title.clone()).collect()
    }

    fn raw(pairs: &[(&str, &str)]) -> RawQuery {
        let mut raw = RawQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "search" => raw.search = value,
                "location" => raw.location = value,
                "type" => raw.job_type = value,
                "experience" => raw.experience = value,
                "salary" => raw.salary = value,
                "sort" => raw.sort = value,
                other => panic!("unexpected key {other}"),
            }
        }
        raw
    }

    #[test]
    fn test_developer_in_100k_to_150k() {
        let jobs = sample_jobs().unwrap();
        let params = QueryParams::from(raw(&[
            ("search", "Developer"),
            ("type", "all"),
            ("salary", "100000-150000"),
        ]));

        let results = query(&jobs, &params);
        assert_eq!(titles(&results), vec!["Senior Frontend Developer"]);
        assert_eq!(results[0].salary_min, 120000);
        assert_eq!(results[0].salary_max, 150000);
    }

    #[test]
    fn test_salary_filter_is_containment_not_overlap() {
        let jobs = sample_jobs().unwrap();
        // Marketing Intern pays 30k-40k, inside 0-50k, but nothing else fits.
        let params = QueryParams::default().salary(SalaryRange::new(0, 50000));
        assert_eq!(titles(&query(&jobs, &params)), vec!["Marketing Intern"]);

        // Senior Frontend (120k-150k) overlaps 50k-130k but is not contained.
        let params = QueryParams::default().salary(SalaryRange::new(50000, 130000));
        let results = query(&jobs, &params);
        assert!(results.iter().all(|job| job.salary_max <= 130000));
        assert!(!titles(&results).contains(&"Senior Frontend Developer".to_string()));
    }

    #[test]
    fn test_salary_range_straddling_job_is_excluded() {
        let jobs = sample_jobs().unwrap();
        // Junior Developer pays 70k-90k and straddles 80k.
        let params = QueryParams::default().salary(SalaryRange::new(80000, 200000));
        assert!(!titles(&query(&jobs, &params)).contains(&"Junior Developer".to_string()));
    }

    #[test]
    fn test_sort_by_salary_descending() {
        let jobs = sample_jobs().unwrap();
        let params = QueryParams::default().sort(SortKey::Salary);
        let maxima: Vec<u64> = query(&jobs, &params).iter().map(|j| j.salary_max).collect();
        assert_eq!(maxima, vec![150000, 140000, 130000, 90000, 80000, 40000]);
    }

    #[test]
    fn test_sort_by_deadline_ascending() {
        let jobs = sample_jobs().unwrap();
        let results = query(&jobs, &QueryParams::default());
        let ids: Vec<&str> = results.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "5", "4", "6"]);
    }

    #[test]
    fn test_sort_by_posted_descending() {
        let jobs = sample_jobs().unwrap();
        let params = QueryParams::default().sort(SortKey::Posted);
        let ids: Vec<&str> = query(&jobs, &params).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn test_no_filters_returns_permutation() {
        let jobs = sample_jobs().unwrap();
        for key in [SortKey::Deadline, SortKey::Posted, SortKey::Salary] {
            let results = query(&jobs, &QueryParams::default().sort(key));
            assert_eq!(results.len(), jobs.len());
            for job in &jobs {
                assert!(results.iter().any(|r| r.id == job.id));
            }
            for pair in results.windows(2) {
                assert_ne!(key.compare(pair[0], pair[1]), Ordering::Greater);
            }
        }
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut jobs = sample_jobs().unwrap();
        for job in &mut jobs {
            job.salary_max = 100000;
            job.salary_min = 50000;
        }
        let params = QueryParams::default().sort(SortKey::Salary);
        let ids: Vec<&str> = query(&jobs, &params).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_query_is_idempotent() {
        let jobs = sample_jobs().unwrap();
        let params = QueryParams::default()
            .term("team")
            .sort(SortKey::Posted);
        assert_eq!(query(&jobs, &params), query(&jobs, &params));
    }

    #[test]
    fn test_every_result_satisfies_active_filters() {
        let jobs = sample_jobs().unwrap();
        let params = QueryParams::default()
            .job_type(JobType::FullTime)
            .experience(ExperienceLevel::Senior);
        let results = query(&jobs, &params);

        assert_eq!(titles(&results), vec!["Senior Frontend Developer", "Data Scientist"]);
        assert!(results.iter().all(|job| params.matches(job)));
    }

    #[test]
    fn test_term_matches_company_and_description_case_insensitively() {
        let jobs = sample_jobs().unwrap();

        let by_company = query(&jobs, &QueryParams::default().term("datacorp"));
        assert_eq!(titles(&by_company), vec!["Data Scientist"]);

        let by_description = query(&jobs, &QueryParams::default().term("NEW GRADUATES"));
        assert_eq!(titles(&by_description), vec!["Junior Developer"]);
    }

    #[test]
    fn test_term_does_not_match_location() {
        let jobs = sample_jobs().unwrap();
        assert!(query(&jobs, &QueryParams::default().term("Boston")).is_empty());
    }

    #[test]
    fn test_location_filter() {
        let jobs = sample_jobs().unwrap();
        let results = query(&jobs, &QueryParams::default().location("remote"));
        assert_eq!(titles(&results), vec!["UX Designer"]);
    }

    #[test]
    fn test_unknown_enum_values_disable_filter() {
        let jobs = sample_jobs().unwrap();
        let params = QueryParams::from(raw(&[("type", "Gig"), ("experience", "guru")]));

        assert_eq!(params, QueryParams::default());
        assert_eq!(query(&jobs, &params).len(), jobs.len());
    }

    #[test]
    fn test_malformed_salary_disables_filter() {
        for value in ["all", "", "lots", "100000", "-5-10", "1-2-3"] {
            let params = QueryParams::from(raw(&[("salary", value)]));
            assert_eq!(params.salary, None, "salary {value:?}");
        }

        let params = QueryParams::from(raw(&[("salary", " 50000 - 100000 ")]));
        assert_eq!(params.salary, Some(SalaryRange::new(50000, 100000)));
    }

    #[test]
    fn test_sort_defaults_and_unknown_keys() {
        assert_eq!(QueryParams::from(raw(&[])).sort, Some(SortKey::Deadline));
        assert_eq!(
            QueryParams::from(raw(&[("sort", "salary")])).sort,
            Some(SortKey::Salary)
        );

        let jobs = sample_jobs().unwrap();
        let params = QueryParams::from(raw(&[("sort", "random")]));
        assert_eq!(params, QueryParams::default().unsorted());
        let ids: Vec<&str> = query(&jobs, &params).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_query_leaves_source_untouched() {
        let jobs = sample_jobs().unwrap();
        let before = jobs.clone();
        let _ = query(&jobs, &QueryParams::default().sort(SortKey::Salary));
        assert_eq!(jobs, before);
    }

    #[test]
    fn test_empty_collection() {
        assert!(query(&[], &QueryParams::default().term("anything")).is_empty());
    }
}
