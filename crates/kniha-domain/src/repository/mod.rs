//! Repository trait definitions for data persistence

use chrono::NaiveDate;

use kniha_types::Error;
use kniha_types::{Driver, Holiday, Place, Trip, Vehicle};

/// Repository for registered vehicles
pub trait VehicleRepository {
    fn find_all(&self) -> Result<Vec<Vehicle>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, Error>;
}

/// Repository for drivers
pub trait DriverRepository {
    fn find_all(&self) -> Result<Vec<Driver>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<Driver>, Error>;
}

/// Repository for places (client sites, own premises, headquarters)
pub trait PlaceRepository {
    fn find_all(&self) -> Result<Vec<Place>, Error>;

    /// Places matching the given ids, in catalog order; unknown ids are skipped
    fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Place>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect())
    }
}

/// Repository for holidays and company days off
pub trait HolidayRepository {
    fn find_all(&self) -> Result<Vec<Holiday>, Error>;

    /// Holidays falling into `[from, to]`; recurring ones always included
    fn find_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Holiday>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|h| h.recurring || (h.date >= from && h.date <= to))
            .collect())
    }
}

/// Repository for recorded trips
pub trait TripRepository {
    /// Append new trips to the collection
    fn append(&self, trips: &[Trip]) -> Result<(), Error>;

    /// All trips ordered by start time
    fn find_all(&self) -> Result<Vec<Trip>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<Trip>, Error>;

    fn find_by_vehicle(&self, vehicle_id: &str) -> Result<Vec<Trip>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|t| t.vehicle_id == vehicle_id)
            .collect())
    }

    /// Replace a stored trip; locked trips may only be unlocked
    fn update(&self, trip: Trip) -> Result<Trip, Error>;
}
