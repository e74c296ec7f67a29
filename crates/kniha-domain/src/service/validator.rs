//! Generation request validation

use chrono::NaiveDate;
use kniha_types::ValidationError;

use crate::model::{DriverMode, GenerationParams};

/// Highest reading of a seven-digit odometer
pub const MAX_ODOMETER_KM: u32 = 9_999_999;

/// Parse a `YYYY-MM-DD` date from user input
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Reject malformed requests before anything is generated
pub fn validate(params: &GenerationParams) -> Result<(), ValidationError> {
    if params.vehicle_id.trim().is_empty() {
        return Err(ValidationError::MissingVehicle);
    }
    if params.date_from > params.date_to {
        return Err(ValidationError::DateRangeReversed {
            from: params.date_from,
            to: params.date_to,
        });
    }
    if params.odo_end < params.odo_start {
        return Err(ValidationError::OdometerReversed {
            start: params.odo_start,
            end: params.odo_end,
        });
    }
    if params.odo_end > MAX_ODOMETER_KM {
        return Err(ValidationError::OdometerTooLarge {
            end: params.odo_end,
            max: MAX_ODOMETER_KM,
        });
    }
    if !params.days_enabled.any() {
        return Err(ValidationError::NoWeekdayEnabled);
    }
    if params.place_ids.is_empty() && !params.add_all_places {
        return Err(ValidationError::NoPlaces);
    }
    if params.driver_mode == DriverMode::Fixed
        && params.driver_id.as_deref().map_or(true, |id| id.trim().is_empty())
    {
        return Err(ValidationError::MissingFixedDriver);
    }
    Ok(())
}
