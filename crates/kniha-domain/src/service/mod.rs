//! Domain services

pub mod committer;
pub mod day_sequence;
pub mod pipeline;
pub mod reconciler;
pub mod synthesizer;
pub mod validator;

pub use committer::{default_origin, materialize, origin_from_places};
pub use day_sequence::DaySequence;
pub use pipeline::{generate, GenerationOutcome};
pub use reconciler::OdometerReconciler;
pub use synthesizer::TripSynthesizer;
pub use validator::{parse_date, validate};
