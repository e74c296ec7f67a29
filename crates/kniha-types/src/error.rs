//! Error types for kniha-jazd

use chrono::NaiveDate;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Rejections raised before any trip is generated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Vehicle must be selected")]
    MissingVehicle,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date range is empty: {from} is after {to}")]
    DateRangeReversed { from: NaiveDate, to: NaiveDate },

    #[error("Odometer end ({end} km) is lower than start ({start} km)")]
    OdometerReversed { start: u32, end: u32 },

    #[error("Odometer end ({end} km) exceeds the maximum of {max} km")]
    OdometerTooLarge { end: u32, max: u32 },

    #[error("At least one weekday must be enabled")]
    NoWeekdayEnabled,

    #[error("At least one place must be selected")]
    NoPlaces,

    #[error("Fixed driver mode requires a driver")]
    MissingFixedDriver,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation run not found: {0}. Please regenerate the preview.")]
    RunNotFound(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Trip {0} is locked")]
    TripLocked(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

impl Error {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True for errors that mean "the referenced record or run does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RunNotFound(_) | Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
