//! Inactive Roster Exporter: projects the inactive-patient slice of a report
//! into the outreach CSV the front desk hands to whoever runs the follow-up
//! campaign.
//!
//! The payload is UTF-8 with a byte-order mark so spreadsheet tools render
//! accented names correctly, textual fields are double-quoted, and money
//! columns use es-CL thousands grouping.

use crate::models::PatientProfile;
use crate::utils::format_clp;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const BOM: &str = "\u{feff}";

pub const ROSTER_HEADERS: [&str; 10] = [
    "RUT",
    "Nombre",
    "Correo",
    "Celular",
    "Última Visita",
    "Días Sin Visita",
    "Total Atenciones",
    "Total Gastado",
    "Promedio por Atención",
    "Servicios Utilizados",
];

/// The finished artifact: payload plus the suggested filename, both handed
/// to whatever collaborator actually persists or downloads the file.
#[derive(Debug, Clone)]
pub struct RosterExport {
    pub filename: String,
    pub payload: String,
    pub patient_count: usize,
}

pub struct InactiveRosterExporter;

impl InactiveRosterExporter {
    /// Render the inactive roster as a delimited payload.
    /// `today` anchors the days-since-last-visit column and the filename.
    pub fn export(inactivos: &[PatientProfile], today: NaiveDate) -> Result<RosterExport> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(Vec::new());

        writer
            .write_record(ROSTER_HEADERS)
            .context("Failed to write roster header")?;

        for patient in inactivos {
            let dias_sin_visita = (today - patient.ultima_visita).num_days();
            let servicios: Vec<&str> = patient.servicios.iter().map(String::as_str).collect();

            writer
                .write_record([
                    patient.rut.as_str(),
                    patient.nombre.as_str(),
                    patient.correo.as_str(),
                    patient.celular.as_str(),
                    &patient.ultima_visita.format("%d-%m-%Y").to_string(),
                    &dias_sin_visita.to_string(),
                    &patient.total_atenciones.to_string(),
                    &format_clp(patient.total_gastado),
                    &format_clp(patient.promedio_por_atencion()),
                    &servicios.join("; "),
                ])
                .with_context(|| format!("Failed to write roster row for {}", patient.rut))?;
        }

        let body = writer
            .into_inner()
            .context("Failed to flush roster payload")?;
        let body = String::from_utf8(body).context("Roster payload is not valid UTF-8")?;

        Ok(RosterExport {
            filename: format!("pacientes_inactivos_{}.csv", today.format("%Y-%m-%d")),
            payload: format!("{}{}", BOM, body),
            patient_count: inactivos.len(),
        })
    }

    /// Write the artifact under `dir` using its suggested filename.
    pub fn write_to(export: &RosterExport, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&export.filename);
        std::fs::write(&path, export.payload.as_bytes())
            .with_context(|| format!("Failed to write roster file: {}", path.display()))?;
        Ok(path)
    }
}
