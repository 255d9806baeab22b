use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Invalid job data: {0}")]
    Data(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Minimum salary ({min}) cannot be greater than maximum salary ({max})")]
    InvalidSalaryRange { min: u64, max: u64 },

    #[error("Duplicate job id: {0}")]
    DuplicateId(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, BoardError>;
