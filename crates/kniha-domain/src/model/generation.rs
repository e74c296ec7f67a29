//! Trip generation request parameters

use chrono::{NaiveDate, Weekday};
use kniha_types::TripType;
use serde::{Deserialize, Serialize};

/// Where the target kilometres come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KmSource {
    /// Odometer (tachometer) readings
    #[default]
    Tacho,
    /// Fuel-cost based (PHL) distance
    Phl,
}

impl std::fmt::Display for KmSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KmSource::Tacho => write!(f, "tacho"),
            KmSource::Phl => write!(f, "phl"),
        }
    }
}

/// How drivers are assigned to generated trips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverMode {
    #[default]
    None,
    Random,
    Fixed,
}

/// Fuel-cost based distance mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhlMode {
    #[default]
    None,
    CheckOnly,
    Full,
}

impl PhlMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, PhlMode::None)
    }
}

/// Per-weekday inclusion flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysEnabled {
    pub mon: bool,
    pub tue: bool,
    pub wed: bool,
    pub thu: bool,
    pub fri: bool,
    pub sat: bool,
    pub sun: bool,
}

impl Default for DaysEnabled {
    fn default() -> Self {
        Self::workdays()
    }
}

impl DaysEnabled {
    /// Monday to Friday
    pub fn workdays() -> Self {
        Self {
            mon: true,
            tue: true,
            wed: true,
            thu: true,
            fri: true,
            sat: false,
            sun: false,
        }
    }

    pub fn all() -> Self {
        Self {
            sat: true,
            sun: true,
            ..Self::workdays()
        }
    }

    pub fn none() -> Self {
        Self {
            mon: false,
            tue: false,
            wed: false,
            thu: false,
            fri: false,
            sat: false,
            sun: false,
        }
    }

    /// Build from a list of weekdays
    pub fn from_weekdays(days: &[Weekday]) -> Self {
        let mut enabled = Self::none();
        for day in days {
            enabled.set(*day, true);
        }
        enabled
    }

    pub fn is_enabled(&self, day: Weekday) -> bool {
        match day {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    pub fn set(&mut self, day: Weekday, enabled: bool) {
        let slot = match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        };
        *slot = enabled;
    }

    pub fn any(&self) -> bool {
        self.mon || self.tue || self.wed || self.thu || self.fri || self.sat || self.sun
    }
}

/// Trip generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub vehicle_id: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub odo_start: u32,
    pub odo_end: u32,
    #[serde(default)]
    pub km_source: KmSource,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub days_enabled: DaysEnabled,
    #[serde(default)]
    pub ignore_weekends: bool,
    #[serde(default)]
    pub ignore_holidays: bool,
    #[serde(default)]
    pub place_ids: Vec<String>,
    /// Use every known place instead of `place_ids`
    #[serde(default)]
    pub add_all_places: bool,
    #[serde(default)]
    pub driver_mode: DriverMode,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub phl_mode: PhlMode,
}

impl GenerationParams {
    /// Minimal request; everything else takes its default
    pub fn new(
        vehicle_id: impl Into<String>,
        date_from: NaiveDate,
        date_to: NaiveDate,
        odo_start: u32,
        odo_end: u32,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            date_from,
            date_to,
            odo_start,
            odo_end,
            km_source: KmSource::default(),
            trip_type: TripType::default(),
            days_enabled: DaysEnabled::default(),
            ignore_weekends: false,
            ignore_holidays: false,
            place_ids: Vec::new(),
            add_all_places: false,
            driver_mode: DriverMode::default(),
            driver_id: None,
            phl_mode: PhlMode::default(),
        }
    }

    pub fn with_places<I, S>(mut self, place_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.place_ids = place_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_days(mut self, days_enabled: DaysEnabled) -> Self {
        self.days_enabled = days_enabled;
        self
    }

    pub fn with_fixed_driver(mut self, driver_id: impl Into<String>) -> Self {
        self.driver_mode = DriverMode::Fixed;
        self.driver_id = Some(driver_id.into());
        self
    }

    /// Kilometres the generated trips should add up to
    pub fn target_km(&self) -> u32 {
        self.odo_end.saturating_sub(self.odo_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_enabled_lookup() {
        let days = DaysEnabled::workdays();
        assert!(days.is_enabled(Weekday::Mon));
        assert!(days.is_enabled(Weekday::Fri));
        assert!(!days.is_enabled(Weekday::Sat));
        assert!(!DaysEnabled::none().any());

        let custom = DaysEnabled::from_weekdays(&[Weekday::Sat]);
        assert!(custom.is_enabled(Weekday::Sat));
        assert!(!custom.is_enabled(Weekday::Mon));
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let json = r#"{
            "vehicle_id": "v1",
            "date_from": "2024-01-01",
            "date_to": "2024-01-07",
            "odo_start": 1000,
            "odo_end": 1200,
            "place_ids": ["p1"]
        }"#;
        let params: GenerationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.target_km(), 200);
        assert_eq!(params.days_enabled, DaysEnabled::workdays());
        assert_eq!(params.driver_mode, DriverMode::None);
        assert!(!params.phl_mode.is_enabled());
    }
}
