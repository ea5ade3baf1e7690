//! pvq: PlantView Query - CLI for searching assets and tracking maintenance.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pvq")]
#[command(about = "PlantView Query - search equipment and track maintenance")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Evaluate dates as of this day (YYYY-MM-DD, default: today)
    #[arg(long = "today", global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search assets with free text (e.g., "critical pumps in Plant A")
    #[command(visible_alias = "s")]
    Search {
        /// Search text
        #[arg(default_value = "")]
        query: String,

        /// Named filter (e.g., no-parts-activity)
        #[arg(short = 'f', long = "filter")]
        filter: Option<String>,

        /// Output format: table, json, csv
        #[arg(long = "format", default_value = "table")]
        format: String,

        /// Don't record this search in recent searches
        #[arg(long = "no-history")]
        no_history: bool,
    },

    /// Show how a search string is interpreted
    Parse {
        /// Search text
        query: String,
    },

    /// List or clear recent searches
    Recent {
        /// Forget all recent searches
        #[arg(long = "clear")]
        clear: bool,
    },

    /// Show the maintenance calendar for a month
    #[command(visible_alias = "cal")]
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(short = 'm', long = "month")]
        month: Option<String>,
    },

    /// Move an asset's next maintenance date
    Reschedule {
        /// Asset id (e.g., AST-003)
        asset_id: String,

        /// New date (YYYY-MM-DD)
        date: String,
    },

    /// Complete a maintenance job and record it in history
    Complete {
        /// Asset id (e.g., AST-001)
        asset_id: String,

        /// Technician performing the work
        #[arg(short = 't', long = "technician")]
        technician: String,

        /// Sign-off signature (default: technician name)
        #[arg(short = 's', long = "signature")]
        signature: Option<String>,

        /// Free-form notes
        #[arg(short = 'n', long = "notes", default_value = "")]
        notes: String,

        /// Part number consumed (repeatable)
        #[arg(short = 'p', long = "part")]
        parts: Vec<String>,
    },

    /// Show completed maintenance
    History {
        /// Maximum entries to show
        #[arg(short = 'n', long = "limit", default_value = "20")]
        limit: usize,

        /// Only entries for this asset
        #[arg(short = 'a', long = "asset")]
        asset: Option<String>,
    },

    /// Apply an action to every asset matching a search
    Bulk {
        #[command(subcommand)]
        action: BulkCommand,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum BulkCommand {
    /// Set the status of matching assets
    Status {
        /// New status (e.g., "out-of-service")
        status: String,
        /// Search text selecting the assets
        query: String,
    },
    /// Schedule maintenance for matching assets
    Schedule {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Search text selecting the assets
        query: String,
    },
    /// Export matching assets as CSV
    Export {
        /// Search text selecting the assets
        query: String,
    },
}

fn init_logger(verbose: bool) {
    if std::env::var("RUST_LOG").is_err() {
        let level = if verbose { "debug" } else { "warn" };
        std::env::set_var("RUST_LOG", level);
    }
    pretty_env_logger::init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = commands::resolve_today(cli.today.as_deref()).and_then(|today| match cli.command {
        Commands::Search { query, filter, format, no_history } => {
            commands::search(&query, filter.as_deref(), &format, !no_history, today)
        }
        Commands::Parse { query } => commands::parse(&query),
        Commands::Recent { clear } => commands::recent(clear),
        Commands::Calendar { month } => commands::calendar(month.as_deref(), today),
        Commands::Reschedule { asset_id, date } => commands::reschedule(&asset_id, &date, today),
        Commands::Complete { asset_id, technician, signature, notes, parts } => {
            commands::complete(&asset_id, &technician, signature.as_deref(), &notes, &parts)
        }
        Commands::History { limit, asset } => commands::history(limit, asset.as_deref()),
        Commands::Bulk { action } => match action {
            BulkCommand::Status { status, query } => {
                commands::bulk_status(&status, &query, today)
            }
            BulkCommand::Schedule { date, query } => {
                commands::bulk_schedule(&date, &query, today)
            }
            BulkCommand::Export { query } => commands::bulk_export(&query, today),
        },
        Commands::Config => commands::show_config(),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
