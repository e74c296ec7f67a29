//! Command handlers

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Weekday;
use kniha_app::config::Config;
use kniha_app::export::export_trips_to_excel;
use kniha_app::repository::{open_catalog, open_preview_store, open_trip_store};
use kniha_app::GenerationService;
use kniha_domain::model::{DaysEnabled, GenerationParams};
use kniha_domain::repository::{TripRepository, VehicleRepository};
use kniha_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands, GenerateArgs, TripsAction};
use crate::output::{output_preview, output_trips};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    if let Some(ref path) = cli.catalog {
        config.catalog_path = Some(path.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Generate(args) => cmd_generate(&config, args, output_format),

        Commands::Trips { action } => match action {
            TripsAction::List { vehicle } => {
                cmd_trips_list(&config, vehicle.as_deref(), output_format)
            }
            TripsAction::Export { output, vehicle } => {
                cmd_trips_export(&config, output.clone(), vehicle.as_deref())
            }
            TripsAction::Lock { id } => cmd_trips_set_locked(&config, id, true),
            TripsAction::Unlock { id } => cmd_trips_set_locked(&config, id, false),
        },

        Commands::Config {
            show,
            set_store_dir,
            set_catalog,
            set_preview_ttl,
            set_seed,
            set_format,
            reset,
        } => cmd_config(
            *show,
            set_store_dir.clone(),
            set_catalog.clone(),
            *set_preview_ttl,
            *set_seed,
            *set_format,
            *reset,
        ),
    }
}

fn build_params(args: &GenerateArgs) -> GenerationParams {
    let mut params = GenerationParams::new(
        args.vehicle.clone(),
        args.from,
        args.to,
        args.odo_start,
        args.odo_end,
    )
    .with_places(args.places.iter().cloned());

    if !args.days.is_empty() {
        let days: Vec<Weekday> = args.days.iter().map(|d| Weekday::from(*d)).collect();
        params = params.with_days(DaysEnabled::from_weekdays(&days));
    }

    params.add_all_places = args.all_places;
    params.ignore_weekends = args.ignore_weekends;
    params.ignore_holidays = args.ignore_holidays;
    params.driver_mode = args.driver_mode.into();
    params.driver_id = args.driver.clone();
    params.phl_mode = args.phl_mode.into();
    params.trip_type = args.trip_type.into();
    params
}

fn cmd_generate(config: &Config, args: &GenerateArgs, output_format: OutputFormat) -> Result<()> {
    let catalog = open_catalog(config)?;
    let trips = open_trip_store(config)?;
    let previews = open_preview_store(config);
    let service =
        GenerationService::new(&catalog, &trips, previews).with_seed(args.seed.or(config.seed));

    let preview = service.preview(build_params(args))?;
    let vehicle_name = VehicleRepository::find_by_id(&catalog, &args.vehicle)?
        .map(|v| v.display_name())
        .unwrap_or_else(|| args.vehicle.clone());
    output_preview(output_format, &vehicle_name, &preview)?;

    if preview.trips.is_empty() {
        service.cancel(&preview.run_id)?;
        eprintln!("\nNothing to confirm");
        return Ok(());
    }

    let confirmed = if args.dry_run {
        false
    } else {
        args.yes || ask_confirmation(preview.trips.len())?
    };

    if confirmed {
        let created = service.confirm(&preview.run_id)?;
        eprintln!("\nCreated {} trips", created.len());
    } else {
        service.cancel(&preview.run_id)?;
        eprintln!("\nPreview discarded");
    }

    Ok(())
}

fn ask_confirmation(count: usize) -> Result<bool> {
    eprint!("\nSave {} generated trips? [y/N] ", count);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "a" | "ano"))
}

fn load_trips(config: &Config, vehicle: Option<&str>) -> Result<Vec<kniha_types::Trip>> {
    let store = open_trip_store(config)?;
    match vehicle {
        Some(id) => store.find_by_vehicle(id),
        None => store.find_all(),
    }
}

fn cmd_trips_list(
    config: &Config,
    vehicle: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let trips = load_trips(config, vehicle)?;
    output_trips(output_format, &trips)
}

fn cmd_trips_export(config: &Config, output_path: PathBuf, vehicle: Option<&str>) -> Result<()> {
    let trips = load_trips(config, vehicle)?;
    export_trips_to_excel(&trips, &output_path)?;

    println!("Exported {} trips to: {}", trips.len(), output_path.display());
    Ok(())
}

fn cmd_trips_set_locked(config: &Config, id: &str, locked: bool) -> Result<()> {
    let store = open_trip_store(config)?;
    let (trip, verb) = if locked {
        (store.lock(id)?, "Locked")
    } else {
        (store.unlock(id)?, "Unlocked")
    };
    println!("{} trip {} ({})", verb, trip.id, trip.date.format("%d.%m.%Y"));
    Ok(())
}

fn cmd_config(
    show: bool,
    set_store_dir: Option<PathBuf>,
    set_catalog: Option<PathBuf>,
    set_preview_ttl: Option<u64>,
    set_seed: Option<u64>,
    set_format: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }

    if let Some(path) = set_catalog {
        config.catalog_path = Some(path);
        modified = true;
    }

    if let Some(ttl) = set_preview_ttl {
        config.preview_ttl_secs = ttl;
        modified = true;
    }

    if let Some(seed) = set_seed {
        config.seed = (seed != 0).then_some(seed);
        modified = true;
    }

    if let Some(output_format) = set_format {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
