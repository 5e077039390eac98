use thiserror::Error;

/// Rejection reported by [`crate::rule::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid repeat rule: {0}")]
    InvalidRule(String),

    #[error("Unknown repeat rule kind: '{0}'")]
    UnknownRuleKind(String),
}

/// Failure of a next-date calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Repeat rule must not be empty")]
    EmptyRule,

    #[error("Invalid start date '{0}', expected YYYYMMDD")]
    InvalidStartDate(String),

    #[error("Unsupported repeat rule kind: '{0}'")]
    UnsupportedRuleKind(String),

    #[error("Missing parameter for repeat rule '{0}'")]
    MissingRuleParameter(String),

    #[error("Invalid repeat rule parameter: {0}")]
    InvalidRuleParameter(String),

    #[error("Date arithmetic left the supported calendar range")]
    DateOutOfRange,
}

impl From<CalculationError> for ValidationError {
    fn from(err: CalculationError) -> Self {
        match err {
            CalculationError::UnsupportedRuleKind(kind) => ValidationError::UnknownRuleKind(kind),
            CalculationError::InvalidRuleParameter(detail) => ValidationError::InvalidRule(detail),
            CalculationError::MissingRuleParameter(kind) => {
                ValidationError::InvalidRule(format!("missing parameter for '{}'", kind))
            }
            other => ValidationError::InvalidRule(other.to_string()),
        }
    }
}

/// Failure while normalizing a task's date on create or update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid date '{0}', expected YYYYMMDD")]
    InvalidDate(String),

    #[error("Invalid repeat rule: {0}")]
    InvalidRecurrence(#[source] CalculationError),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
