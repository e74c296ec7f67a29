//! Randomized trip synthesis for a single day
//!
//! Placeholder generator: 1-3 trips per day, uniform place choice, 10-59 km,
//! start between 08:00 and 17:59, one hour long. No overlap or driver
//! availability checks are made.

use chrono::{Duration, NaiveDate, NaiveTime};
use kniha_types::{Driver, Place};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{DriverMode, GeneratedTripPreview, GenerationParams, PhlMode, TripFlag};
use crate::service::reconciler::OdometerReconciler;

const TRIPS_PER_DAY: std::ops::RangeInclusive<usize> = 1..=3;
const KM_RANGE: std::ops::Range<u32> = 10..60;
const PHL_EXTRA_KM: std::ops::Range<u32> = 0..5;
const START_HOURS: std::ops::Range<u32> = 8..18;
const TRIP_MINUTES: i64 = 60;

pub struct TripSynthesizer<'a, R: Rng> {
    rng: R,
    places: &'a [Place],
    drivers: &'a [Driver],
    driver_mode: DriverMode,
    fixed_driver_id: Option<&'a str>,
    phl_mode: PhlMode,
}

impl<'a, R: Rng> TripSynthesizer<'a, R> {
    pub fn new(
        rng: R,
        params: &'a GenerationParams,
        places: &'a [Place],
        drivers: &'a [Driver],
    ) -> Self {
        Self {
            rng,
            places,
            drivers,
            driver_mode: params.driver_mode,
            fixed_driver_id: params.driver_id.as_deref(),
            phl_mode: params.phl_mode,
        }
    }

    /// Generate the trips of one day, stopping once the target is reached
    pub fn synthesize_day(
        &mut self,
        date: NaiveDate,
        reconciler: &mut OdometerReconciler,
    ) -> Vec<GeneratedTripPreview> {
        let mut trips = Vec::new();
        if self.places.is_empty() {
            return trips;
        }

        let count = self.rng.gen_range(TRIPS_PER_DAY);
        for _ in 0..count {
            if reconciler.target_reached() {
                break;
            }
            let trip = self.synthesize_trip(date);
            reconciler.record(&trip);
            trips.push(trip);
        }

        log::debug!(
            "{}: {} trip(s), running total {} km",
            date,
            trips.len(),
            reconciler.total_km()
        );
        trips
    }

    fn synthesize_trip(&mut self, date: NaiveDate) -> GeneratedTripPreview {
        let places = self.places;
        let place = &places[self.rng.gen_range(0..places.len())];
        let km = self.rng.gen_range(KM_RANGE);
        let km_extra = if self.phl_mode.is_enabled() {
            self.rng.gen_range(PHL_EXTRA_KM)
        } else {
            0
        };

        let hour = self.rng.gen_range(START_HOURS);
        let minute = self.rng.gen_range(0..60);
        let time_from = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        let time_to = time_from + Duration::minutes(TRIP_MINUTES);

        let (driver_id, driver_name) = self.pick_driver();

        let mode_flag = if self.phl_mode.is_enabled() {
            TripFlag::PhlBased
        } else {
            TripFlag::Fixed
        };

        GeneratedTripPreview {
            date,
            time_from,
            time_to,
            place_id: place.id.clone(),
            place_name: place.name.clone(),
            km,
            km_extra,
            driver_id,
            driver_name,
            flags: vec![TripFlag::Generated, mode_flag],
        }
    }

    fn pick_driver(&mut self) -> (Option<String>, Option<String>) {
        match self.driver_mode {
            DriverMode::None => (None, None),
            DriverMode::Fixed => {
                let id = self.fixed_driver_id.map(str::to_string);
                let name = self
                    .fixed_driver_id
                    .and_then(|id| self.drivers.iter().find(|d| d.id == id))
                    .map(|d| d.name.clone());
                (id, name)
            }
            DriverMode::Random => match self.drivers.choose(&mut self.rng) {
                Some(driver) => (Some(driver.id.clone()), Some(driver.name.clone())),
                None => (None, None),
            },
        }
    }
}
