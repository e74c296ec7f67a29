//! Turning a confirmed preview batch into trip records

use chrono::{DateTime, Utc};
use kniha_types::{Place, PlaceType, Trip, TripLocation, TripRoute, TripSource};

use crate::model::{GeneratedTripPreview, GenerationRun};

/// Start point used when the catalog has no headquarters
pub fn default_origin() -> TripLocation {
    TripLocation {
        name: "Sídlo firmy".to_string(),
        address: "Hlavná 1, Bratislava".to_string(),
        coordinates: Some(kniha_types::Coordinates {
            lat: 48.1486,
            lng: 17.1077,
        }),
    }
}

/// Trip origin: the first headquarters place, else the default
pub fn origin_from_places(places: &[Place]) -> TripLocation {
    places
        .iter()
        .find(|p| p.place_type == PlaceType::Headquarters)
        .map(Place::to_location)
        .unwrap_or_else(default_origin)
}

/// Build trip records for every preview of `run`
///
/// Trips are ordered by date and start time; odometer readings chain from
/// `params.odo_start`.
pub fn materialize(
    run: &GenerationRun,
    origin: &TripLocation,
    places: &[Place],
    now: DateTime<Utc>,
) -> Vec<Trip> {
    let mut previews: Vec<&GeneratedTripPreview> = run.trips.iter().collect();
    previews.sort_by_key(|p| (p.date, p.time_from));

    let params = &run.params;
    let mut odometer = params.odo_start;

    previews
        .into_iter()
        .map(|preview| {
            let distance = preview.total_km();
            let destination = places
                .iter()
                .find(|p| p.id == preview.place_id)
                .map(Place::to_location)
                .unwrap_or_else(|| TripLocation {
                    name: preview.place_name.clone(),
                    address: preview.place_name.clone(),
                    coordinates: None,
                });

            let trip = Trip {
                id: Trip::new_id(),
                vehicle_id: params.vehicle_id.clone(),
                driver_id: preview.driver_id.clone().or_else(|| params.driver_id.clone()),
                date: preview.date,
                start_time: preview.date.and_time(preview.time_from),
                end_time: preview.date.and_time(preview.time_to),
                start_odometer: odometer,
                end_odometer: odometer + distance,
                distance_km: distance,
                trip_type: params.trip_type,
                source: TripSource::Generated,
                route: TripRoute {
                    from: origin.clone(),
                    to: destination,
                },
                locked: false,
                notes: Some(format!("Automaticky vygenerovaná jazda ({})", run.id)),
                created_at: now,
                updated_at: now,
            };
            odometer += distance;
            trip
        })
        .collect()
}
