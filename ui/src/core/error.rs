//! Error types for persistence, submissions and configuration.

use thiserror::Error;

/// Failures raised by a [`RecordStore`](crate::core::storage::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The persisted slot holds something other than a list of observations.
    #[error("stored observations are unreadable: {0}")]
    Corrupt(String),

    /// The backend refused the write (quota exhausted, disk error, ...).
    #[error("couldn't save observations: {0}")]
    Persistence(String),

    /// No storage backend is reachable on this platform.
    #[error("local storage is unavailable: {0}")]
    Unavailable(String),
}

/// Why a form submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please fill in all fields.")]
    MissingFields(Vec<Field>),

    #[error("'{0}' is not a calendar date (expected YYYY-MM-DD).")]
    InvalidDate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Inputs of the observation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StudentName,
    Date,
    Type,
    Notes,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::StudentName => "Student name",
            Field::Date => "Date",
            Field::Type => "Type",
            Field::Notes => "Notes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("storage key must not be empty")]
    EmptyStorageKey,

    #[error("at least one observation type is required")]
    NoObservationTypes,

    #[error("observation type '{0}' may only contain lowercase letters, digits, '-' or '_'")]
    UnsafeTypeValue(String),

    #[error("observation type '{0}' is listed more than once")]
    DuplicateType(String),

    #[error("couldn't read configuration: {0}")]
    Read(String),

    #[error("configuration is not valid JSON: {0}")]
    Parse(String),
}
