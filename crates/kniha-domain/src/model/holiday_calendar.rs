//! Holiday lookup used when generation skips days off

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use kniha_types::Holiday;

#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    dates: HashSet<NaiveDate>,
    /// (month, day) pairs that repeat every year
    recurring: HashSet<(u32, u32)>,
}

impl HolidayCalendar {
    pub fn new(holidays: &[Holiday]) -> Self {
        let mut calendar = Self::default();
        for holiday in holidays {
            if holiday.recurring {
                calendar
                    .recurring
                    .insert((holiday.date.month(), holiday.date.day()));
            } else {
                calendar.dates.insert(holiday.date);
            }
        }
        calendar
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date) || self.recurring.contains(&(date.month(), date.day()))
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.recurring.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kniha_types::HolidayType;

    fn holiday(date: &str, recurring: bool) -> Holiday {
        Holiday {
            id: date.to_string(),
            date: date.parse().unwrap(),
            name: "Sviatok".to_string(),
            holiday_type: HolidayType::Public,
            country: "SK".to_string(),
            recurring,
        }
    }

    #[test]
    fn test_recurring_holiday_matches_any_year() {
        let calendar = HolidayCalendar::new(&[holiday("2023-01-06", true)]);
        assert!(calendar.contains("2024-01-06".parse().unwrap()));
        assert!(!calendar.contains("2024-01-07".parse().unwrap()));
    }

    #[test]
    fn test_one_off_holiday_matches_exact_date() {
        let calendar = HolidayCalendar::new(&[holiday("2024-03-29", false)]);
        assert!(calendar.contains("2024-03-29".parse().unwrap()));
        assert!(!calendar.contains("2025-03-29".parse().unwrap()));
    }
}
