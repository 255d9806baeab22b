//! Employer job posting.
//!
//! [`NewJob`] is what an employer submits. It becomes a [`Job`] only after
//! [`NewJob::validate`] passes, which is the single place the
//! `salary_min <= salary_max` invariant is enforced for new listings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::job::{Category, ExperienceLevel, Job, JobType};

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: Category,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    pub salary_min: u64,
    pub salary_max: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub deadline: NaiveDate,
    pub description: String,
    pub responsibilities: String,
    pub requirements: String,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
}

impl NewJob {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("currency", &self.currency),
            ("description", &self.description),
            ("responsibilities", &self.responsibilities),
            ("requirements", &self.requirements),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(BoardError::MissingField(*field));
        }

        if self.salary_min > self.salary_max {
            return Err(BoardError::InvalidSalaryRange {
                min: self.salary_min,
                max: self.salary_max,
            });
        }

        Ok(())
    }

    /// Validates and converts into a listing with no applicants yet.
    pub fn into_job(self, id: String, posted: NaiveDate) -> Result<Job> {
        self.validate()?;

        Ok(Job {
            id,
            title: self.title,
            company: self.company,
            location: self.location,
            job_type: self.job_type,
            category: self.category,
            experience_level: self.experience_level.unwrap_or(ExperienceLevel::Mid),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            currency: self.currency,
            deadline: self.deadline,
            posted_date: posted,
            applicants: 0,
            description: self.description,
            responsibilities: Some(self.responsibilities),
            requirements: Some(self.requirements),
            company_description: non_blank(self.company_description),
            company_website: non_blank(self.company_website),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
