//! Running odometer total and the warnings derived from it

use crate::model::{DriverMode, GeneratedTripPreview, GenerationWarning, WarningCode};

/// Tracks generated kilometres against the odometer target
#[derive(Debug, Clone)]
pub struct OdometerReconciler {
    target_km: u32,
    total_km: u32,
}

impl OdometerReconciler {
    pub fn new(target_km: u32) -> Self {
        Self {
            target_km,
            total_km: 0,
        }
    }

    pub fn record(&mut self, trip: &GeneratedTripPreview) {
        self.total_km += trip.total_km();
    }

    pub fn target_reached(&self) -> bool {
        self.total_km >= self.target_km
    }

    pub fn total_km(&self) -> u32 {
        self.total_km
    }

    /// Signed difference between generated and target kilometres
    pub fn difference(&self) -> i64 {
        i64::from(self.total_km) - i64::from(self.target_km)
    }

    pub fn warnings(
        &self,
        driver_mode: DriverMode,
        trips: &[GeneratedTripPreview],
    ) -> Vec<GenerationWarning> {
        let mut warnings = Vec::new();

        if self.total_km != self.target_km {
            warnings.push(GenerationWarning {
                code: WarningCode::KmMismatch,
                count: 1,
                message: format!(
                    "Rozdiel {} km medzi cieľom a vygenerovanými jazdami",
                    self.difference().abs()
                ),
            });
        }

        let missing = match driver_mode {
            DriverMode::None => trips.len(),
            DriverMode::Random | DriverMode::Fixed => {
                trips.iter().filter(|t| t.driver_id.is_none()).count()
            }
        };
        if driver_mode == DriverMode::None || missing > 0 {
            warnings.push(GenerationWarning {
                code: WarningCode::MissingDrivers,
                count: missing,
                message: "Niektoré jazdy nemajú priradeného vodiča".to_string(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TripFlag;
    use chrono::{NaiveDate, NaiveTime};

    fn preview(km: u32, driver: Option<&str>) -> GeneratedTripPreview {
        GeneratedTripPreview {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time_from: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            time_to: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            place_id: "p1".to_string(),
            place_name: "Klient".to_string(),
            km,
            km_extra: 0,
            driver_id: driver.map(str::to_string),
            driver_name: None,
            flags: vec![TripFlag::Generated, TripFlag::Fixed],
        }
    }

    #[test]
    fn test_exact_total_has_no_mismatch() {
        let trips = vec![preview(30, Some("d1")), preview(20, Some("d1"))];
        let mut rec = OdometerReconciler::new(50);
        trips.iter().for_each(|t| rec.record(t));
        assert!(rec.target_reached());
        assert!(rec.warnings(DriverMode::Fixed, &trips).is_empty());
    }

    #[test]
    fn test_mismatch_reports_absolute_difference() {
        let trips = vec![preview(30, Some("d1"))];
        let mut rec = OdometerReconciler::new(50);
        trips.iter().for_each(|t| rec.record(t));
        assert!(!rec.target_reached());
        let warnings = rec.warnings(DriverMode::Fixed, &trips);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::KmMismatch);
        assert!(warnings[0].message.contains("20 km"));
    }

    #[test]
    fn test_driver_mode_none_flags_all_trips() {
        let trips = vec![preview(25, None), preview(25, None)];
        let mut rec = OdometerReconciler::new(50);
        trips.iter().for_each(|t| rec.record(t));
        let warnings = rec.warnings(DriverMode::None, &trips);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::MissingDrivers);
        assert_eq!(warnings[0].count, 2);
    }

    #[test]
    fn test_random_mode_counts_unassigned() {
        let trips = vec![preview(25, Some("d1")), preview(25, None)];
        let mut rec = OdometerReconciler::new(50);
        trips.iter().for_each(|t| rec.record(t));
        let warnings = rec.warnings(DriverMode::Random, &trips);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].count, 1);
    }

    #[test]
    fn test_zero_target_is_reached_immediately() {
        let rec = OdometerReconciler::new(0);
        assert!(rec.target_reached());
        assert!(rec.warnings(DriverMode::Fixed, &[]).is_empty());
    }
}
