//! Falcon Sports CLI - the admin operations from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Open a session (the flag is kept in .falcon-session.json)
//! falcon login -u admin -p secret
//!
//! # Reports
//! falcon report day --date 2025-01-06
//! falcon report monthly --month 1 --year 2025
//! falcon report pending --from 2025-01-01 --to 2025-01-31
//!
//! # Records
//! falcon config set DailyTarget 500 --update
//! falcon address add 55501234 --name Ali --address Doha
//!
//! # Uploads and invoices
//! falcon upload bookings ./booking-jan.xlsx
//! falcon invoice pdf 55501234 --select 7 9 --output Invoice.pdf
//! ```
//!
//! # Environment Variables
//!
//! - `FALCON_API_BASE_URL` - Falcon backend root
//! - `FALCON_API_TIMEOUT_SECS` - Per-request timeout
//! - `FALCON_STATE_FILE` - Session flag file (default: `.falcon-session.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use falcon_admin::api::FalconClient;
use falcon_admin::config::FalconApiConfig;
use falcon_core::{
    Address, ConfigEntry, MonthlyQuery, PendingAmountsQuery, SessionGate, SlotDate, SubmitMode,
    UploadKind, ValidationError,
};

mod commands;
mod state_file;

use commands::{CommandError, Context};
use state_file::{DEFAULT_STATE_FILE, FileFlagStore};

#[derive(Parser)]
#[command(name = "falcon")]
#[command(author, version, about = "Falcon Sports admin CLI")]
struct Cli {
    /// File holding the session flag
    #[arg(long, global = true, env = "FALCON_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with backend credentials
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "FALCON_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show whether a session is open
    Status,
    /// Manage configuration entries
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage the address book
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Print a report
    Report {
        #[command(subcommand)]
        report: ReportKind,
    },
    /// Upload a bookings or cancellations spreadsheet
    Upload {
        #[arg(value_enum)]
        kind: UploadTarget,

        /// Excel file (.xlsx or .xls)
        file: PathBuf,
    },
    /// Search billable slots and generate invoices
    Invoice {
        #[command(subcommand)]
        action: InvoiceAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List all entries
    List,
    /// Create an entry, or update it with --update
    Set {
        key: String,
        value: String,

        /// Update an existing entry instead of creating one
        #[arg(long)]
        update: bool,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List all addresses
    List,
    /// Add an address
    Add(AddressArgs),
    /// Update the address for a mobile number
    Update(AddressArgs),
}

#[derive(clap::Args)]
struct AddressArgs {
    /// Customer mobile number
    mobile_number: String,

    #[arg(short, long, default_value = "")]
    name: String,

    #[arg(short, long, default_value = "")]
    address: String,
}

impl From<AddressArgs> for Address {
    fn from(args: AddressArgs) -> Self {
        Self::new(args.mobile_number, args.name, args.address)
    }
}

#[derive(Subcommand)]
enum ReportKind {
    /// Daily income summary and bookings (default: today)
    Day {
        #[arg(long)]
        date: Option<String>,
    },
    /// Daily income for the last seven days
    Last7,
    /// Monthly collection (default: this month)
    Monthly {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },
    /// Pending amounts (default: the last 30 days)
    Pending {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
    /// Actual income by sport for today
    Actuals,
}

#[derive(Clone, Copy, ValueEnum)]
enum UploadTarget {
    Bookings,
    Cancellations,
}

impl From<UploadTarget> for UploadKind {
    fn from(target: UploadTarget) -> Self {
        match target {
            UploadTarget::Bookings => Self::Bookings,
            UploadTarget::Cancellations => Self::Cancellations,
        }
    }
}

#[derive(Subcommand)]
enum InvoiceAction {
    /// List billable slots for a mobile number
    Search { query: String },
    /// Generate the invoice PDF for selected slot ids
    Pdf {
        query: String,

        /// Slot ids to include
        #[arg(short, long, num_args = 1..)]
        select: Vec<String>,

        #[arg(short, long, default_value = "Invoice.pdf")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "falcon=info,falcon_core=warn,falcon_admin=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn parse_date(raw: &str) -> Result<SlotDate, ValidationError> {
    SlotDate::parse(raw.trim())
        .map_err(|_| ValidationError::new(format!("Invalid date '{raw}', expected YYYY-MM-DD.")))
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let _ = dotenvy::dotenv();

    let api = FalconClient::new(&FalconApiConfig::from_env()?)?;
    let gate = SessionGate::restore(FileFlagStore::new(cli.state_file)).await;
    let mut ctx = Context::new(api, gate);
    let mut out = std::io::stdout();
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&mut ctx, &mut out, &username, password).await?;
        }
        Commands::Logout => commands::auth::logout(&mut ctx, &mut out).await?,
        Commands::Status => commands::auth::status(&ctx, &mut out)?,
        Commands::Config { action } => match action {
            ConfigAction::List => commands::records::list_config(&ctx, &mut out).await?,
            ConfigAction::Set { key, value, update } => {
                let mode = if update {
                    SubmitMode::Update
                } else {
                    SubmitMode::Create
                };
                commands::records::set_config(&ctx, &mut out, mode, ConfigEntry::new(key, value))
                    .await?;
            }
        },
        Commands::Address { action } => match action {
            AddressAction::List => commands::records::list_addresses(&ctx, &mut out).await?,
            AddressAction::Add(args) => {
                commands::records::save_address(&ctx, &mut out, SubmitMode::Create, args.into())
                    .await?;
            }
            AddressAction::Update(args) => {
                commands::records::save_address(&ctx, &mut out, SubmitMode::Update, args.into())
                    .await?;
            }
        },
        Commands::Report { report } => match report {
            ReportKind::Day { date } => {
                let date = date
                    .as_deref()
                    .map_or(Ok(SlotDate::new(today)), parse_date)?;
                commands::reports::day(&ctx, &mut out, date).await?;
            }
            ReportKind::Last7 => commands::reports::last_7_days(&ctx, &mut out).await?,
            ReportKind::Monthly { month, year } => {
                let current = MonthlyQuery::containing(today);
                let query = MonthlyQuery::new(
                    month.unwrap_or_else(|| current.month()),
                    year.unwrap_or_else(|| current.year()),
                )?;
                commands::reports::monthly(&ctx, &mut out, query).await?;
            }
            ReportKind::Pending { from, to } => {
                let default = PendingAmountsQuery::ending(today);
                let from = from
                    .as_deref()
                    .map_or(Ok(default.from_date()), parse_date)?;
                let to = to.as_deref().map_or(Ok(default.to_date()), parse_date)?;
                let query = PendingAmountsQuery::new(from, to)?;
                commands::reports::pending(&ctx, &mut out, query).await?;
            }
            ReportKind::Actuals => commands::reports::actuals(&ctx, &mut out).await?,
        },
        Commands::Upload { kind, file } => {
            commands::bookings::upload(&ctx, &mut out, kind.into(), &file).await?;
        }
        Commands::Invoice { action } => match action {
            InvoiceAction::Search { query } => {
                commands::bookings::search_invoices(&ctx, &mut out, &query).await?;
            }
            InvoiceAction::Pdf {
                query,
                select,
                output,
            } => {
                commands::bookings::generate_pdf(&ctx, &mut out, &query, &select, &output)
                    .await?;
            }
        },
    }
    Ok(())
}
