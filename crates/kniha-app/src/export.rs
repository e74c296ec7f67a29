//! Excel export of the driving log

use kniha_types::{Error, Result, Trip, TripType};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Kilometre totals shown on the summary sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripTotals {
    pub trip_count: usize,
    pub total_km: u64,
    pub business_km: u64,
    pub private_km: u64,
}

impl TripTotals {
    pub fn from_trips(trips: &[Trip]) -> Self {
        trips.iter().fold(Self::default(), |mut totals, trip| {
            let km = u64::from(trip.distance_km);
            totals.trip_count += 1;
            totals.total_km += km;
            match trip.trip_type {
                TripType::Business => totals.business_km += km,
                TripType::Private => totals.private_km += km,
                TripType::Mixed | TripType::Unknown => {}
            }
            totals
        })
    }
}

/// Export trips to an Excel file
pub fn export_trips_to_excel(trips: &[Trip], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, trips)?;

    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, trips)?;

    workbook.save(output_path).map_err(excel_err)?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, trips: &[Trip]) -> Result<()> {
    sheet.set_name("Súhrn").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let totals = TripTotals::from_trips(trips);

    sheet
        .write_string_with_format(0, 0, "Kniha jázd", &header_format)
        .map_err(excel_err)?;

    let rows: [(&str, f64); 4] = [
        ("Počet jázd:", totals.trip_count as f64),
        ("Spolu km:", totals.total_km as f64),
        ("Služobné km:", totals.business_km as f64),
        ("Súkromné km:", totals.private_km as f64),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let row = (i + 2) as u32;
        sheet.write_string(row, 0, *label).map_err(excel_err)?;
        sheet.write_number(row, 1, *value).map_err(excel_err)?;
    }

    sheet.set_column_width(0, 16).map_err(excel_err)?;

    Ok(())
}

fn write_details_sheet(sheet: &mut Worksheet, trips: &[Trip]) -> Result<()> {
    sheet.set_name("Jazdy").map_err(excel_err)?;

    let header_format = Format::new().set_bold();

    let headers = [
        "Dátum",
        "Odchod",
        "Príchod",
        "Odkiaľ",
        "Kam",
        "Tachometer od",
        "Tachometer do",
        "km",
        "Typ",
        "Zdroj",
        "Vodič",
        "Poznámka",
    ];

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (row_idx, trip) in trips.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, trip.date.format("%d.%m.%Y").to_string())
            .map_err(excel_err)?;
        sheet
            .write_string(row, 1, trip.start_time.format("%H:%M").to_string())
            .map_err(excel_err)?;
        sheet
            .write_string(row, 2, trip.end_time.format("%H:%M").to_string())
            .map_err(excel_err)?;
        sheet
            .write_string(row, 3, &trip.route.from.name)
            .map_err(excel_err)?;
        sheet
            .write_string(row, 4, &trip.route.to.name)
            .map_err(excel_err)?;
        sheet
            .write_number(row, 5, f64::from(trip.start_odometer))
            .map_err(excel_err)?;
        sheet
            .write_number(row, 6, f64::from(trip.end_odometer))
            .map_err(excel_err)?;
        sheet
            .write_number(row, 7, f64::from(trip.distance_km))
            .map_err(excel_err)?;
        sheet
            .write_string(row, 8, trip.trip_type.label())
            .map_err(excel_err)?;
        sheet
            .write_string(row, 9, trip.source.label())
            .map_err(excel_err)?;
        if let Some(ref driver) = trip.driver_id {
            sheet.write_string(row, 10, driver).map_err(excel_err)?;
        }
        if let Some(ref notes) = trip.notes {
            sheet.write_string(row, 11, notes).map_err(excel_err)?;
        }
    }

    sheet.set_column_width(3, 24).map_err(excel_err)?;
    sheet.set_column_width(4, 24).map_err(excel_err)?;
    sheet.set_column_width(11, 40).map_err(excel_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use kniha_types::{TripLocation, TripRoute, TripSource};
    use tempfile::tempdir;

    fn trip(km: u32, trip_type: TripType) -> Trip {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let location = TripLocation {
            name: "Sídlo firmy".to_string(),
            address: "Hlavná 1, Bratislava".to_string(),
            coordinates: None,
        };
        Trip {
            id: Trip::new_id(),
            vehicle_id: "v1".to_string(),
            driver_id: Some("d1".to_string()),
            date,
            start_time: date.and_time(NaiveTime::from_hms_opt(8, 30, 0).unwrap()),
            end_time: date.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            start_odometer: 1000,
            end_odometer: 1000 + km,
            distance_km: km,
            trip_type,
            source: TripSource::Generated,
            route: TripRoute {
                from: location.clone(),
                to: location,
            },
            locked: false,
            notes: Some("test".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals_split_by_type() {
        let trips = vec![
            trip(40, TripType::Business),
            trip(15, TripType::Private),
            trip(5, TripType::Mixed),
        ];
        let totals = TripTotals::from_trips(&trips);
        assert_eq!(totals.trip_count, 3);
        assert_eq!(totals.total_km, 60);
        assert_eq!(totals.business_km, 40);
        assert_eq!(totals.private_km, 15);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kniha.xlsx");
        export_trips_to_excel(&[trip(40, TripType::Business)], &path).unwrap();
        assert!(path.exists());
    }
}
