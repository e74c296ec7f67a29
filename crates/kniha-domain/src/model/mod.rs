//! Domain model types

pub mod generation;
pub mod holiday_calendar;
pub mod preview;

pub use generation::{
    DaysEnabled, DriverMode, GenerationParams, KmSource, PhlMode,
};
pub use holiday_calendar::HolidayCalendar;
pub use preview::{
    GeneratedTripPreview, GenerationRun, GenerationStatus, GenerationSummary, GenerationWarning,
    PreviewResponse, RunId, TripFlag, WarningCode,
};
