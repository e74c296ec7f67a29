//! Generation Service - preview, confirm and cancel generated trips
//!
//! Workflow:
//! 1. Validate the request and resolve vehicle, places, drivers, holidays
//! 2. Run the generation pipeline
//! 3. Hold the result in the preview store under a fresh run id
//! 4. On confirm, materialize the run into trip records and append them
//! 5. On cancel, drop the run

use std::sync::Arc;

use chrono::Utc;
use kniha_domain::model::{
    DriverMode, GenerationParams, GenerationRun, GenerationStatus, PreviewResponse, RunId,
};
use kniha_domain::repository::{
    DriverRepository, HolidayRepository, PlaceRepository, TripRepository, VehicleRepository,
};
use kniha_domain::service::{generate, materialize, origin_from_places, validate};
use kniha_store::PreviewStore;
use kniha_types::{Error, Place, Result, Trip, ValidationError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct GenerationService<'a> {
    vehicles: &'a dyn VehicleRepository,
    drivers: &'a dyn DriverRepository,
    places: &'a dyn PlaceRepository,
    holidays: &'a dyn HolidayRepository,
    trips: &'a dyn TripRepository,
    previews: Arc<PreviewStore>,
    seed: Option<u64>,
}

impl<'a> GenerationService<'a> {
    /// Service over a catalog providing all master data
    pub fn new<C>(
        catalog: &'a C,
        trips: &'a dyn TripRepository,
        previews: Arc<PreviewStore>,
    ) -> Self
    where
        C: VehicleRepository + DriverRepository + PlaceRepository + HolidayRepository,
    {
        Self {
            vehicles: catalog,
            drivers: catalog,
            places: catalog,
            holidays: catalog,
            trips,
            previews,
            seed: None,
        }
    }

    /// Make every preview reproducible
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn previews(&self) -> &Arc<PreviewStore> {
        &self.previews
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    fn resolve_places(&self, params: &GenerationParams) -> Result<Vec<Place>> {
        let places = if params.add_all_places {
            self.places.find_all()?
        } else {
            self.places.find_by_ids(&params.place_ids)?
        };
        if places.is_empty() {
            return Err(ValidationError::NoPlaces.into());
        }
        Ok(places)
    }

    /// Generate trips and hold them pending confirmation
    pub fn preview(&self, params: GenerationParams) -> Result<PreviewResponse> {
        validate(&params)?;

        let vehicle = self
            .vehicles
            .find_by_id(&params.vehicle_id)?
            .ok_or_else(|| Error::not_found("Vehicle", &params.vehicle_id))?;

        if params.driver_mode == DriverMode::Fixed {
            let driver_id = params.driver_id.as_deref().unwrap_or_default();
            if self.drivers.find_by_id(driver_id)?.is_none() {
                return Err(Error::not_found("Driver", driver_id));
            }
        }

        let places = self.resolve_places(&params)?;
        let drivers = self.drivers.find_all()?;
        let holidays = if params.ignore_holidays {
            self.holidays.find_in_range(params.date_from, params.date_to)?
        } else {
            Vec::new()
        };

        let outcome = generate(&params, &places, &drivers, &holidays, self.rng())?;

        let run = GenerationRun {
            id: RunId::generate(),
            params,
            status: GenerationStatus::Preview,
            created_at: Utc::now(),
            trips: outcome.trips,
            summary: outcome.summary,
        };
        let response = PreviewResponse::from(&run);

        log::info!(
            "Stored preview {} for {}: {} trips, {} km",
            run.id,
            vehicle.display_name(),
            run.summary.total_generated_trips,
            run.summary.total_km
        );
        let purged = self.previews.purge_expired();
        if purged > 0 {
            log::debug!("Purged {} expired generation runs", purged);
        }
        self.previews.insert(run);

        Ok(response)
    }

    /// Turn a pending run into trip records
    pub fn confirm(&self, run_id: &RunId) -> Result<Vec<Trip>> {
        let run = self.previews.take(run_id).ok_or_else(|| {
            log::warn!("No pending generation run {}", run_id);
            Error::RunNotFound(run_id.to_string())
        })?;

        let places = self.places.find_all()?;
        let origin = origin_from_places(&places);
        let trips = materialize(&run, &origin, &places, Utc::now());

        if let Err(e) = self.trips.append(&trips) {
            // Keep the run so the user can retry the confirmation
            self.previews.insert(run);
            return Err(e);
        }

        log::info!(
            "Confirmed generation run {}: created {} trips",
            run_id,
            trips.len()
        );
        Ok(trips)
    }

    /// Discard a pending run; unknown ids are ignored
    pub fn cancel(&self, run_id: &RunId) -> Result<()> {
        if self.previews.remove(run_id) {
            log::info!("Cancelled generation run {}", run_id);
        } else {
            log::debug!("Cancel for unknown generation run {}", run_id);
        }
        Ok(())
    }

    /// Inspect a pending run without consuming it
    pub fn get_run(&self, run_id: &RunId) -> Result<GenerationRun> {
        self.previews
            .get(run_id)
            .ok_or_else(|| Error::RunNotFound(run_id.to_string()))
    }
}
