use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Declares a closed enumeration whose wire label, `Display` output and
/// `FromStr` input are all the same string.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BoardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| BoardError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

labelled_enum! {
    /// Employment arrangement of a listing.
    JobType, "job type" {
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
        Freelance => "Freelance",
        Internship => "Internship",
        Hybrid => "Hybrid",
    }
}

labelled_enum! {
    Category, "category" {
        Technology => "Technology",
        Design => "Design",
        Marketing => "Marketing",
        Sales => "Sales",
        CustomerService => "Customer Service",
        Finance => "Finance",
        Healthcare => "Healthcare",
        Education => "Education",
        Management => "Management",
        Other => "Other",
    }
}

labelled_enum! {
    ExperienceLevel, "experience level" {
        Internship => "internship",
        Entry => "entry",
        Junior => "junior",
        Mid => "mid",
        Senior => "senior",
    }
}

/// A single job listing.
///
/// `salary_min <= salary_max` is guaranteed by whoever created the record
/// (see [`crate::posting`] and [`crate::source`]); the query engine relies on
/// it but never checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: Category,
    pub experience_level: ExperienceLevel,
    pub salary_min: u64,
    pub salary_max: u64,
    pub currency: String,
    pub deadline: NaiveDate,
    pub posted_date: NaiveDate,
    pub applicants: u32,
    pub description: String,

    // Only present on listings posted through the employer form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
}
