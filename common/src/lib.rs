//! Shared job-board types and the listing query engine.
//!
//! Both the server and any other front end work against the same [`Job`]
//! record; everything here is synchronous and free of I/O except the JSON
//! loaders in [`source`] and the file-backed session store.

pub mod error;
pub mod job;
pub mod posting;
pub mod query;
pub mod sample;
pub mod session;
pub mod source;

pub use error::{BoardError, Result};
pub use job::{Category, ExperienceLevel, Job, JobType};
pub use posting::NewJob;
pub use query::{QueryParams, RawQuery, SalaryRange, SortKey, query};
