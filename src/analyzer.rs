//! Analysis Engine
//!
//! [`ClinicAnalyzer`] coordinates the whole pipeline for one export file:
//! read bytes, parse rows, normalize sessions, build the report, then hand
//! the result to the display manager or the roster exporter depending on the
//! command. Each run is self-contained; nothing is cached between files.

use crate::display::ReportDisplayManager;
use crate::export::InactiveRosterExporter;
use crate::ingest::SessionReader;
use crate::models::Report;
use crate::normalize::RowNormalizer;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub file: PathBuf,
    pub json_output: bool,
    pub limit: Option<usize>,
    /// Anchor date for the trend window and inactivity cutoff.
    pub today: NaiveDate,
    /// Target directory for the roster export.
    pub output_dir: Option<PathBuf>,
}

pub struct ClinicAnalyzer {
    display_manager: ReportDisplayManager,
}

impl Default for ClinicAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClinicAnalyzer {
    pub fn new() -> Self {
        Self {
            display_manager: ReportDisplayManager::new(),
        }
    }

    /// Ingest one export file and build the full report snapshot.
    pub async fn build_report(&self, file: &PathBuf, today: NaiveDate) -> Result<Report> {
        let rows = SessionReader::load(file).await?;
        let sessions = RowNormalizer::normalize_all(&rows);

        if sessions.is_empty() {
            warn!(file = %file.display(), "No usable session rows in export");
        }

        Ok(Report::build(sessions, today))
    }

    pub async fn run_command(&self, command: &str, options: RunOptions) -> Result<()> {
        let report = self.build_report(&options.file, options.today).await?;

        match command {
            "summary" => self.display_manager.display_summary(&report, options.json_output),
            "monthly" => {
                self.display_manager
                    .display_monthly(&report, options.limit, options.json_output)
            }
            "services" => {
                self.display_manager
                    .display_services(&report, options.limit, options.json_output)
            }
            "inactive" => self.display_manager.display_inactive(
                &report,
                options.today,
                options.limit,
                options.json_output,
            ),
            "export" => self.export_roster(&report, &options)?,
            _ => {
                anyhow::bail!("Unknown command: {}", command);
            }
        }

        Ok(())
    }

    fn export_roster(&self, report: &Report, options: &RunOptions) -> Result<()> {
        if report.pacientes_inactivos.is_empty() {
            println!("No hay pacientes inactivos para exportar.");
            return Ok(());
        }

        let export = InactiveRosterExporter::export(&report.pacientes_inactivos, options.today)?;
        let dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = InactiveRosterExporter::write_to(&export, &dir)?;

        info!(path = %path.display(), patients = export.patient_count, "Roster exported");
        println!(
            "✅ {} pacientes inactivos exportados a {}",
            export.patient_count,
            path.display()
        );

        Ok(())
    }
}
