use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use nutridash::analyzer::{ClinicAnalyzer, RunOptions};
use nutridash::config::get_config;
use nutridash::logging;

#[derive(Parser)]
#[command(name = "nutridash")]
#[command(about = "Patient retention and revenue analytics for clinic session exports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall KPIs: patients, revenue, retention, inactivity
    Summary {
        /// Session export file (CSV)
        file: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Anchor date override (YYYY-MM-DD), defaults to the current date
        #[arg(long)]
        today: Option<String>,
    },
    /// Show the twelve-month trend of sessions, patients and revenue
    Monthly {
        /// Session export file (CSV)
        file: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Show last N months only
        #[arg(long)]
        limit: Option<usize>,
        /// Anchor date override (YYYY-MM-DD), defaults to the current date
        #[arg(long)]
        today: Option<String>,
    },
    /// Show service, price point and payment method rankings
    Services {
        /// Session export file (CSV)
        file: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Show top N services only
        #[arg(long)]
        limit: Option<usize>,
        /// Anchor date override (YYYY-MM-DD), defaults to the current date
        #[arg(long)]
        today: Option<String>,
    },
    /// List patients with no visit in the last two months
    Inactive {
        /// Session export file (CSV)
        file: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Show first N patients only
        #[arg(long)]
        limit: Option<usize>,
        /// Anchor date override (YYYY-MM-DD), defaults to the current date
        #[arg(long)]
        today: Option<String>,
    },
    /// Write the inactive-patient outreach CSV
    Export {
        /// Session export file (CSV)
        file: PathBuf,
        /// Target directory for the roster file
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Anchor date override (YYYY-MM-DD), defaults to the current date
        #[arg(long)]
        today: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let analyzer = ClinicAnalyzer::new();

    let (command, options) = match cli.command {
        Commands::Summary { file, json, today } => (
            "summary",
            build_options(file, json, None, today, None),
        ),
        Commands::Monthly {
            file,
            json,
            limit,
            today,
        } => ("monthly", build_options(file, json, limit, today, None)),
        Commands::Services {
            file,
            json,
            limit,
            today,
        } => ("services", build_options(file, json, limit, today, None)),
        Commands::Inactive {
            file,
            json,
            limit,
            today,
        } => ("inactive", build_options(file, json, limit, today, None)),
        Commands::Export {
            file,
            output_dir,
            today,
        } => {
            let dir = output_dir.unwrap_or_else(|| get_config().export.output_dir.clone());
            ("export", build_options(file, false, None, today, Some(dir)))
        }
    };

    let json_output = options.json_output;
    match analyzer.run_command(command, options).await {
        Ok(_) => Ok(()),
        Err(e) => handle_error(e, json_output),
    }
}

fn build_options(
    file: PathBuf,
    json: bool,
    limit: Option<usize>,
    today: Option<String>,
    output_dir: Option<PathBuf>,
) -> RunOptions {
    let today = resolve_today(today, json);
    RunOptions {
        file,
        json_output: json,
        limit,
        today,
        output_dir,
    }
}

fn resolve_today(raw: Option<String>, json: bool) -> NaiveDate {
    match raw {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                if !json {
                    eprintln!("❌ Invalid --today date format: {}. Use YYYY-MM-DD", raw);
                }
                process::exit(1);
            }
        },
        None => Local::now().date_naive(),
    }
}

fn handle_error(e: anyhow::Error, json: bool) -> Result<(), anyhow::Error> {
    if json {
        println!("{{\"error\": \"{}\"}}", e);
    } else {
        eprintln!("Error: {}", e);
    }
    process::exit(1);
}
