//! Generation pipeline: validate, walk the calendar, synthesize, reconcile

use kniha_types::{Driver, Holiday, Place, ValidationError};
use rand::Rng;

use crate::model::{GeneratedTripPreview, GenerationParams, GenerationSummary, HolidayCalendar};
use crate::service::day_sequence::DaySequence;
use crate::service::reconciler::OdometerReconciler;
use crate::service::synthesizer::TripSynthesizer;
use crate::service::validator::validate;

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub trips: Vec<GeneratedTripPreview>,
    pub summary: GenerationSummary,
}

/// Run the whole generation for already resolved places and drivers
pub fn generate<R: Rng>(
    params: &GenerationParams,
    places: &[Place],
    drivers: &[Driver],
    holidays: &[Holiday],
    rng: R,
) -> Result<GenerationOutcome, ValidationError> {
    validate(params)?;
    if places.is_empty() {
        return Err(ValidationError::NoPlaces);
    }

    let mut days = DaySequence::from_params(params);
    if params.ignore_holidays && !holidays.is_empty() {
        days = days.skip_holidays(HolidayCalendar::new(holidays));
    }

    let mut reconciler = OdometerReconciler::new(params.target_km());
    let mut synthesizer = TripSynthesizer::new(rng, params, places, drivers);

    let mut trips = Vec::new();
    for date in days.iter() {
        if reconciler.target_reached() {
            break;
        }
        trips.extend(synthesizer.synthesize_day(date, &mut reconciler));
    }

    let warnings = reconciler.warnings(params.driver_mode, &trips);
    let summary = GenerationSummary {
        total_days: days.total_days(),
        total_generated_trips: trips.len(),
        total_km: reconciler.total_km(),
        km_source: params.km_source,
        warnings,
    };

    Ok(GenerationOutcome { trips, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DaysEnabled, WarningCode};
    use chrono::{Datelike, NaiveDate, Weekday};
    use kniha_types::PlaceType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn places() -> Vec<Place> {
        vec![Place {
            id: "p1".to_string(),
            name: "Klient Trnava".to_string(),
            place_type: PlaceType::Client,
            address: None,
            latitude: None,
            longitude: None,
        }]
    }

    fn week_params() -> GenerationParams {
        GenerationParams::new(
            "v1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            1000,
            1200,
        )
        .with_places(["p1"])
        .with_days(DaysEnabled::workdays())
    }

    #[test]
    fn test_week_generates_on_workdays_only() {
        let params = week_params();
        let outcome =
            generate(&params, &places(), &[], &[], ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(outcome.summary.total_days, 7);
        assert_eq!(outcome.summary.total_generated_trips, outcome.trips.len());
        for trip in &outcome.trips {
            assert!(!matches!(trip.date.weekday(), Weekday::Sat | Weekday::Sun));
            assert_eq!(trip.place_id, "p1");
        }
        assert!(outcome.summary.has_warning(WarningCode::MissingDrivers));
    }

    #[test]
    fn test_total_never_overshoots_by_more_than_one_trip() {
        for seed in 0..64 {
            let mut params = week_params();
            params.date_to = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
            params.odo_end = 1000 + 137;
            let outcome =
                generate(&params, &places(), &[], &[], ChaCha8Rng::seed_from_u64(seed)).unwrap();
            let sum: u32 = outcome.trips.iter().map(|t| t.total_km()).sum();
            assert_eq!(sum, outcome.summary.total_km);
            assert!(sum >= 137, "seed {} fell short: {}", seed, sum);
            let last = outcome.trips.last().map(|t| t.total_km()).unwrap_or(0);
            assert!(sum - last < 137, "seed {} kept going after the target", seed);
        }
    }

    #[test]
    fn test_short_range_reports_mismatch() {
        let mut params = week_params();
        params.date_to = params.date_from;
        params.odo_end = 100_000;
        let outcome = generate(&params, &places(), &[], &[], ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert!(outcome.summary.has_warning(WarningCode::KmMismatch));
        assert!(outcome.trips.len() <= 3);
    }

    #[test]
    fn test_invalid_params_generate_nothing() {
        let mut params = week_params();
        params.odo_end = 10;
        let err = generate(&params, &places(), &[], &[], ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, ValidationError::OdometerReversed { .. }));
    }

    #[test]
    fn test_unresolved_places_rejected() {
        let params = week_params();
        let err = generate(&params, &[], &[], &[], ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, ValidationError::NoPlaces);
    }

    #[test]
    fn test_same_seed_same_output() {
        let params = week_params();
        let a = generate(&params, &places(), &[], &[], ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = generate(&params, &places(), &[], &[], ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a.trips, b.trips);
    }
}
