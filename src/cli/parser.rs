use crate::core::location::LocationRequest;
use crate::export::ExportFormat;
use crate::models::lead_type::LeadType;
use crate::models::location_answer::LocationAnswer;
use crate::models::product::Product;
use crate::models::store_category::StoreCategory;
use crate::models::visit_type::VisitType;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for storevisit
/// CLI application to record daily store visit reports in SQLite
#[derive(Parser)]
#[command(
    name = "storevisit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily store visit reports: record leads, products, a photo and the GPS location of each visit",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", env = "STOREVISIT_DB")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Device inputs for location capture, shared by `add` and `locate`.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude reported by the device GPS
    #[arg(long = "lat", allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude reported by the device GPS
    #[arg(long = "lon", allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Geolocation result file written by the device ({"coords": ...} or {"error": ...})
    #[arg(long = "gps-fix", value_name = "FILE", conflicts_with = "lat")]
    pub gps_fix: Option<String>,

    /// Skip the GPS and use network (IP) location
    #[arg(long = "network")]
    pub network: bool,
}

impl LocationArgs {
    pub fn to_request(&self) -> LocationRequest {
        LocationRequest {
            lat: self.lat,
            lon: self.lon,
            gps_fix: self.gps_fix.clone(),
            network: self.network,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Submit a store visit report
    Add {
        /// Salesperson (defaults to the first configured one)
        #[arg(long = "sr")]
        sr_name: Option<String>,

        /// Store name and contact person
        #[arg(long = "store", default_value = "")]
        store_name: String,

        #[arg(long = "visit-type", value_enum, default_value = "new")]
        visit_type: VisitType,

        #[arg(long = "category", value_enum, default_value = "mt")]
        category: StoreCategory,

        #[arg(long = "phone", default_value = "")]
        phone: String,

        #[arg(long = "lead", value_enum, default_value = "hot")]
        lead: LeadType,

        /// Follow-up date (YYYY-MM-DD, defaults to today)
        #[arg(long = "follow-up")]
        follow_up: Option<String>,

        /// Products the store deals in (repeat or comma-separate)
        #[arg(long = "product", value_enum, value_delimiter = ',')]
        products: Vec<Product>,

        /// Order details if converted
        #[arg(long = "order-details")]
        order_details: Option<String>,

        /// Photograph of the store (jpg, jpeg or png)
        #[arg(long = "photo", value_name = "FILE")]
        photo: Option<String>,

        /// Capture the location now if none is recorded yet
        #[arg(long = "record-location")]
        record_location: bool,

        #[command(flatten)]
        location: LocationArgs,

        /// Did you record the location?
        #[arg(long = "location-recorded", value_enum, default_value = "yes")]
        location_recorded: LocationAnswer,
    },

    /// Capture (or reset) the current location
    Locate {
        #[command(flatten)]
        location: LocationArgs,

        /// Forget the recorded location
        #[arg(long = "reset", conflicts_with_all = ["lat", "lon", "gps_fix", "network"])]
        reset: bool,
    },

    /// List store visits
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range (A:B)")]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today's visits")]
        today: bool,

        #[arg(long = "sr", help = "Filter by salesperson")]
        sr_name: Option<String>,

        #[arg(long = "lead", value_enum, help = "Filter by lead type")]
        lead: Option<LeadType>,
    },

    /// Show every field of a single visit
    Show {
        id: i64,

        /// Write the stored photo to this file
        #[arg(long = "photo-out", value_name = "FILE")]
        photo_out: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export store visits
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long = "with-photos", help = "Include base64 photos (csv/json)")]
        with_photos: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
