//! Calendar walk over the requested date range

use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::{DaysEnabled, GenerationParams, HolidayCalendar};

/// Lazy, restartable sequence of the days trips may be generated on
#[derive(Debug, Clone)]
pub struct DaySequence {
    from: NaiveDate,
    to: NaiveDate,
    days_enabled: DaysEnabled,
    ignore_weekends: bool,
    holidays: Option<HolidayCalendar>,
}

impl DaySequence {
    pub fn new(from: NaiveDate, to: NaiveDate, days_enabled: DaysEnabled) -> Self {
        Self {
            from,
            to,
            days_enabled,
            ignore_weekends: false,
            holidays: None,
        }
    }

    pub fn from_params(params: &GenerationParams) -> Self {
        Self::new(params.date_from, params.date_to, params.days_enabled)
            .ignore_weekends(params.ignore_weekends)
    }

    pub fn ignore_weekends(mut self, ignore: bool) -> Self {
        self.ignore_weekends = ignore;
        self
    }

    /// Skip every date found in `calendar`
    pub fn skip_holidays(mut self, calendar: HolidayCalendar) -> Self {
        self.holidays = Some(calendar);
        self
    }

    /// Number of calendar days in the range, inclusive
    pub fn total_days(&self) -> usize {
        if self.to < self.from {
            return 0;
        }
        (self.to - self.from).num_days() as usize + 1
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        if date < self.from || date > self.to {
            return false;
        }
        let weekday = date.weekday();
        if !self.days_enabled.is_enabled(weekday) {
            return false;
        }
        if self.ignore_weekends && matches!(weekday, Weekday::Sat | Weekday::Sun) {
            return false;
        }
        if let Some(ref holidays) = self.holidays {
            if holidays.contains(date) {
                return false;
            }
        }
        true
    }

    /// Iterate the included dates in ascending order
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let to = self.to;
        self.from
            .iter_days()
            .take_while(move |d| *d <= to)
            .filter(move |d| self.includes(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kniha_types::{Holiday, HolidayType};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_workweek_only() {
        // 2024-01-01 is a Monday
        let seq = DaySequence::new(date("2024-01-01"), date("2024-01-07"), DaysEnabled::workdays());
        let days: Vec<_> = seq.iter().collect();
        assert_eq!(
            days,
            vec![
                date("2024-01-01"),
                date("2024-01-02"),
                date("2024-01-03"),
                date("2024-01-04"),
                date("2024-01-05"),
            ]
        );
        assert_eq!(seq.total_days(), 7);
    }

    #[test]
    fn test_range_end_is_inclusive() {
        let seq = DaySequence::new(date("2024-01-05"), date("2024-01-05"), DaysEnabled::all());
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![date("2024-01-05")]);
        assert_eq!(seq.total_days(), 1);
    }

    #[test]
    fn test_ignore_weekends_overrides_enabled_flags() {
        let seq = DaySequence::new(date("2024-01-01"), date("2024-01-31"), DaysEnabled::all())
            .ignore_weekends(true);
        assert!(seq
            .iter()
            .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
        assert_eq!(seq.iter().count(), 23);
    }

    #[test]
    fn test_only_enabled_weekdays_within_range() {
        let days = DaysEnabled::from_weekdays(&[Weekday::Tue, Weekday::Sat]);
        let from = date("2024-02-10");
        let to = date("2024-03-20");
        let seq = DaySequence::new(from, to, days);
        for d in seq.iter() {
            assert!(d >= from && d <= to);
            assert!(matches!(d.weekday(), Weekday::Tue | Weekday::Sat));
        }
        assert!(seq.iter().count() > 0);
    }

    #[test]
    fn test_sequence_is_restartable() {
        let seq = DaySequence::new(date("2024-01-01"), date("2024-01-14"), DaysEnabled::workdays());
        let first: Vec<_> = seq.iter().collect();
        let second: Vec<_> = seq.clone().iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn test_holidays_skipped() {
        let calendar = HolidayCalendar::new(&[Holiday {
            id: "h1".to_string(),
            date: date("2024-01-01"),
            name: "Deň vzniku Slovenskej republiky".to_string(),
            holiday_type: HolidayType::Public,
            country: "SK".to_string(),
            recurring: true,
        }]);
        let seq = DaySequence::new(date("2024-01-01"), date("2024-01-07"), DaysEnabled::workdays())
            .skip_holidays(calendar);
        let days: Vec<_> = seq.iter().collect();
        assert_eq!(days.first(), Some(&date("2024-01-02")));
        assert_eq!(days.len(), 4);
    }
}
