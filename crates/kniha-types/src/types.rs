//! Master data and trip records

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_country() -> String {
    "SK".to_string()
}

/// Registered vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    /// License plate (EČV), e.g. "BA-123AB"
    pub registration_no: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Odometer reading when the vehicle entered the log
    #[serde(default)]
    pub odo_initial_km: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        match (&self.brand, &self.model) {
            (Some(brand), Some(model)) => format!("{} {} ({})", brand, model, self.registration_no),
            (Some(brand), None) => format!("{} ({})", brand, self.registration_no),
            _ => self.registration_no.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_vehicle_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Client,
    OwnPlace,
    Headquarters,
}

/// A named location usable as a trip endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub place_type: PlaceType,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Place {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }

    /// Convert into a trip endpoint, using the name when no address is known
    pub fn to_location(&self) -> TripLocation {
        TripLocation {
            name: self.name.clone(),
            address: self.address.clone().unwrap_or_else(|| self.name.clone()),
            coordinates: self.coordinates(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    Public,
    Company,
    Regional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub holiday_type: HolidayType,
    #[serde(default = "default_country")]
    pub country: String,
    /// Repeats every year on the same month and day
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    Business,
    Private,
    Mixed,
    Unknown,
}

impl TripType {
    pub fn label(&self) -> &'static str {
        match self {
            TripType::Business => "Služobná",
            TripType::Private => "Súkromná",
            TripType::Mixed => "Zmiešaná",
            TripType::Unknown => "Neznáma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripSource {
    Manual,
    GpsAuto,
    GpsCorrected,
    Generated,
}

impl TripSource {
    pub fn label(&self) -> &'static str {
        match self {
            TripSource::Manual => "manual",
            TripSource::GpsAuto => "gps",
            TripSource::GpsCorrected => "gps*",
            TripSource::Generated => "generated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLocation {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRoute {
    pub from: TripLocation,
    pub to: TripLocation,
}

/// A recorded vehicle movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub driver_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_odometer: u32,
    pub end_odometer: u32,
    pub distance_km: u32,
    #[serde(default)]
    pub trip_type: TripType,
    pub source: TripSource,
    pub route: TripRoute,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Fresh trip identifier
    pub fn new_id() -> String {
        format!("trip_{}", uuid::Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_defaults_to_active() {
        let json = r#"{"id":"v1","registration_no":"BA-123AB"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert!(vehicle.active);
        assert_eq!(vehicle.display_name(), "BA-123AB");
    }

    #[test]
    fn test_place_location_falls_back_to_name() {
        let place = Place {
            id: "p1".to_string(),
            name: "Klient Trnava".to_string(),
            place_type: PlaceType::Client,
            address: None,
            latitude: Some(48.37),
            longitude: None,
        };
        let loc = place.to_location();
        assert_eq!(loc.address, "Klient Trnava");
        assert!(loc.coordinates.is_none());
    }

    #[test]
    fn test_trip_ids_are_unique() {
        let a = Trip::new_id();
        let b = Trip::new_id();
        assert!(a.starts_with("trip_"));
        assert_ne!(a, b);
    }
}
