//! Output formatting module

use kniha_app::export::TripTotals;
use kniha_domain::model::PreviewResponse;
use kniha_types::{OutputFormat, Result, Trip};

pub fn output_preview(
    output_format: OutputFormat,
    vehicle_name: &str,
    preview: &PreviewResponse,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(preview)?);
        return Ok(());
    }

    let summary = &preview.summary;
    println!("\nGeneration Preview");
    println!("==================");
    println!("Run:             {}", preview.run_id);
    println!("Vehicle:         {}", vehicle_name);
    println!("Days in range:   {}", summary.total_days);
    println!("Trips:           {}", summary.total_generated_trips);
    println!("Total km:        {} ({})", summary.total_km, summary.km_source);

    if !preview.trips.is_empty() {
        println!();
        println!(
            "{:<10}  {:<11}  {:<24}  {:>5}  {}",
            "Date", "Time", "Place", "km", "Driver"
        );
        println!("{}", "-".repeat(70));
        for trip in &preview.trips {
            println!(
                "{:<10}  {}-{}  {:<24}  {:>5}  {}",
                trip.date.format("%d.%m.%Y"),
                trip.time_from.format("%H:%M"),
                trip.time_to.format("%H:%M"),
                truncate(&trip.place_name, 24),
                trip.total_km(),
                trip.driver_name.as_deref().unwrap_or("-")
            );
        }
    }

    if !summary.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &summary.warnings {
            println!("  [{}] {} ({})", warning.code, warning.message, warning.count);
        }
    }

    Ok(())
}

pub fn output_trips(output_format: OutputFormat, trips: &[Trip]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(trips)?);
        return Ok(());
    }

    if trips.is_empty() {
        println!("No trips recorded");
        return Ok(());
    }

    println!(
        "{:<10}  {:<11}  {:<24}  {:>9}  {:>9}  {:>5}  {}",
        "Date", "Time", "To", "Odo from", "Odo to", "km", "Id"
    );
    println!("{}", "-".repeat(100));
    for trip in trips {
        println!(
            "{:<10}  {}-{}  {:<24}  {:>9}  {:>9}  {:>5}  {}{}",
            trip.date.format("%d.%m.%Y"),
            trip.start_time.format("%H:%M"),
            trip.end_time.format("%H:%M"),
            truncate(&trip.route.to.name, 24),
            trip.start_odometer,
            trip.end_odometer,
            trip.distance_km,
            trip.id,
            if trip.locked { " (locked)" } else { "" }
        );
    }

    let totals = TripTotals::from_trips(trips);
    println!();
    println!(
        "{} trips, {} km (business {} km, private {} km)",
        totals.trip_count, totals.total_km, totals.business_km, totals.private_km
    );

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
