//! Generated trip previews and the run that holds them

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::generation::{GenerationParams, KmSource};

/// Identifier of a pending generation run
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn generate() -> Self {
        RunId(format!("gen_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        RunId(s.to_string())
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        RunId(s)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripFlag {
    Generated,
    Fixed,
    PhlBased,
}

/// A synthesized trip that exists only within its run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTripPreview {
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub place_id: String,
    pub place_name: String,
    pub km: u32,
    /// Extra kilometres added in fuel-cost mode
    pub km_extra: u32,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub flags: Vec<TripFlag>,
}

impl GeneratedTripPreview {
    pub fn total_km(&self) -> u32 {
        self.km + self.km_extra
    }

    pub fn has_flag(&self, flag: TripFlag) -> bool {
        self.flags.contains(&flag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    KmMismatch,
    MissingDrivers,
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningCode::KmMismatch => write!(f, "km_mismatch"),
            WarningCode::MissingDrivers => write!(f, "missing_drivers"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWarning {
    pub code: WarningCode,
    pub count: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub total_days: usize,
    pub total_generated_trips: usize,
    pub total_km: u32,
    pub km_source: KmSource,
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationSummary {
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// Confirmed and cancelled runs leave the preview store; only pending runs exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Preview,
}

/// A batch of previews awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRun {
    pub id: RunId,
    pub params: GenerationParams,
    pub status: GenerationStatus,
    pub created_at: DateTime<Utc>,
    pub trips: Vec<GeneratedTripPreview>,
    pub summary: GenerationSummary,
}

/// What a preview request returns to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub run_id: RunId,
    pub summary: GenerationSummary,
    pub trips: Vec<GeneratedTripPreview>,
}

impl From<&GenerationRun> for PreviewResponse {
    fn from(run: &GenerationRun) -> Self {
        Self {
            run_id: run.id.clone(),
            summary: run.summary.clone(),
            trips: run.trips.clone(),
        }
    }
}
