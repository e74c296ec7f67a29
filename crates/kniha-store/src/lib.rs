//! Stores for pending generation runs and recorded trips

pub mod preview;
pub mod trips;

pub use preview::PreviewStore;
pub use trips::TripStore;
