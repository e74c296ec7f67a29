//! Master data catalog (vehicles, drivers, places, holidays) from TOML

use std::fs;
use std::path::Path;

use kniha_domain::repository::{
    DriverRepository, HolidayRepository, PlaceRepository, VehicleRepository,
};
use kniha_types::{Driver, Error, Holiday, Place, Result, Vehicle};
use serde::Deserialize;

/// Container for parsing catalog.toml
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    drivers: Vec<Driver>,
    #[serde(default)]
    places: Vec<Place>,
    #[serde(default)]
    holidays: Vec<Holiday>,
}

/// Master data loaded from a TOML catalog, kept in file order
#[derive(Debug, Default)]
pub struct CatalogLoader {
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
    places: Vec<Place>,
    holidays: Vec<Holiday>,
}

impl CatalogLoader {
    /// Load the catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;

        let catalog = Self::load_from_str(&content)?;
        log::debug!(
            "Loaded catalog {}: {} vehicles, {} drivers, {} places, {} holidays",
            path.display(),
            catalog.vehicles.len(),
            catalog.drivers.len(),
            catalog.places.len(),
            catalog.holidays.len()
        );
        Ok(catalog)
    }

    /// Load the catalog from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_content)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog TOML: {}", e)))?;

        Ok(Self {
            vehicles: file.vehicles,
            drivers: file.drivers,
            places: file.places,
            holidays: file.holidays,
        })
    }

    /// Empty catalog, used when no catalog file exists yet
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }
}

impl VehicleRepository for CatalogLoader {
    fn find_all(&self) -> Result<Vec<Vehicle>> {
        Ok(self.vehicles.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
        Ok(self.vehicles.iter().find(|v| v.id == id).cloned())
    }
}

impl DriverRepository for CatalogLoader {
    fn find_all(&self) -> Result<Vec<Driver>> {
        Ok(self.drivers.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Driver>> {
        Ok(self.drivers.iter().find(|d| d.id == id).cloned())
    }
}

impl PlaceRepository for CatalogLoader {
    fn find_all(&self) -> Result<Vec<Place>> {
        Ok(self.places.clone())
    }
}

impl HolidayRepository for CatalogLoader {
    fn find_all(&self) -> Result<Vec<Holiday>> {
        Ok(self.holidays.clone())
    }
}
