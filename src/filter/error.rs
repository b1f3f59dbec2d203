use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Invalid potential start date format: {0}")]
    InvalidDate(String),

    #[error("Limit and page must be positive integers")]
    NotPositive,

    #[error("Limit cannot exceed {0}")]
    LimitTooLarge(i64),

    #[error("Page {0} is out of range")]
    PageOutOfRange(i64),

    #[error("Invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0}")]
    InvalidStatus(String),
}
