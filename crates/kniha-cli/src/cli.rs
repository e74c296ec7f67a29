//! CLI definition using clap

use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand, ValueEnum};
use kniha_domain::model::{DriverMode, PhlMode};
use kniha_domain::service::parse_date;
use kniha_types::{OutputFormat, TripType};
use std::path::PathBuf;

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DayArg {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<DayArg> for Weekday {
    fn from(day: DayArg) -> Self {
        match day {
            DayArg::Mon => Weekday::Mon,
            DayArg::Tue => Weekday::Tue,
            DayArg::Wed => Weekday::Wed,
            DayArg::Thu => Weekday::Thu,
            DayArg::Fri => Weekday::Fri,
            DayArg::Sat => Weekday::Sat,
            DayArg::Sun => Weekday::Sun,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DriverModeArg {
    #[default]
    None,
    Random,
    Fixed,
}

impl From<DriverModeArg> for DriverMode {
    fn from(mode: DriverModeArg) -> Self {
        match mode {
            DriverModeArg::None => DriverMode::None,
            DriverModeArg::Random => DriverMode::Random,
            DriverModeArg::Fixed => DriverMode::Fixed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PhlModeArg {
    #[default]
    None,
    CheckOnly,
    Full,
}

impl From<PhlModeArg> for PhlMode {
    fn from(mode: PhlModeArg) -> Self {
        match mode {
            PhlModeArg::None => PhlMode::None,
            PhlModeArg::CheckOnly => PhlMode::CheckOnly,
            PhlModeArg::Full => PhlMode::Full,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TripTypeArg {
    #[default]
    Business,
    Private,
    Mixed,
}

impl From<TripTypeArg> for TripType {
    fn from(t: TripTypeArg) -> Self {
        match t {
            TripTypeArg::Business => TripType::Business,
            TripTypeArg::Private => TripType::Private,
            TripTypeArg::Mixed => TripType::Mixed,
        }
    }
}

#[derive(Parser)]
#[command(name = "kniha-jazd")]
#[command(version)]
#[command(about = "Driving log with trip generation for small businesses")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Master data catalog (TOML). Uses config value if not specified.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory holding trips.json. Uses config value if not specified.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate trips for a vehicle, preview them and confirm
    Generate(GenerateArgs),

    /// Work with recorded trips
    Trips {
        #[command(subcommand)]
        action: TripsAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set trip store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set catalog path
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Set preview lifetime in seconds
        #[arg(long)]
        set_preview_ttl: Option<u64>,

        /// Set a fixed generation seed (0 clears it)
        #[arg(long)]
        set_seed: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Vehicle id from the catalog
    #[arg(long)]
    pub vehicle: String,

    /// First day (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub from: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub to: NaiveDate,

    /// Odometer at the start of the period (km)
    #[arg(long)]
    pub odo_start: u32,

    /// Odometer at the end of the period (km)
    #[arg(long)]
    pub odo_end: u32,

    /// Place ids to visit
    #[arg(long = "place", short = 'p')]
    pub places: Vec<String>,

    /// Use every place from the catalog
    #[arg(long)]
    pub all_places: bool,

    /// Enabled weekdays (default mon-fri)
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<DayArg>,

    /// Never generate on Saturday or Sunday
    #[arg(long)]
    pub ignore_weekends: bool,

    /// Skip holidays listed in the catalog
    #[arg(long)]
    pub ignore_holidays: bool,

    #[arg(long, value_enum, default_value_t)]
    pub driver_mode: DriverModeArg,

    /// Driver id for fixed driver mode
    #[arg(long)]
    pub driver: Option<String>,

    /// Fuel-cost based distance mode
    #[arg(long, value_enum, default_value_t)]
    pub phl_mode: PhlModeArg,

    #[arg(long, value_enum, default_value_t)]
    pub trip_type: TripTypeArg,

    /// Seed for reproducible generation (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Confirm without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show the preview and discard it
    #[arg(long, conflicts_with = "yes")]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum TripsAction {
    /// List recorded trips
    List {
        /// Only trips of this vehicle
        #[arg(long)]
        vehicle: Option<String>,
    },

    /// Export trips to Excel
    Export {
        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Only trips of this vehicle
        #[arg(long)]
        vehicle: Option<String>,
    },

    /// Lock a trip against further edits
    Lock {
        /// Trip id
        id: String,
    },

    /// Allow edits of a locked trip again
    Unlock {
        /// Trip id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "kniha-jazd",
            "generate",
            "--vehicle",
            "v1",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-07",
            "--odo-start",
            "1000",
            "--odo-end",
            "1200",
            "-p",
            "p1",
            "--days",
            "mon,wed,fri",
            "--driver-mode",
            "fixed",
            "--driver",
            "d1",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.places, vec!["p1".to_string()]);
                assert_eq!(args.days, vec![DayArg::Mon, DayArg::Wed, DayArg::Fri]);
                assert_eq!(args.driver_mode, DriverModeArg::Fixed);
                assert_eq!(args.phl_mode, PhlModeArg::None);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_trips_unlock() {
        let cli = Cli::try_parse_from(["kniha-jazd", "trips", "unlock", "trip_abc"]).unwrap();
        match cli.command {
            Commands::Trips {
                action: TripsAction::Unlock { id },
            } => assert_eq!(id, "trip_abc"),
            _ => panic!("expected trips unlock"),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from([
            "kniha-jazd",
            "generate",
            "--vehicle",
            "v1",
            "--from",
            "01.01.2024",
            "--to",
            "2024-01-07",
            "--odo-start",
            "0",
            "--odo-end",
            "1",
        ]);
        assert!(result.is_err());
    }
}
