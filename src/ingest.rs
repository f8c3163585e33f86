//! Input boundary: reads the agenda export and hands back raw rows.
//!
//! The export is a CSV snapshot of the scheduling system's billing sheet,
//! one row per session, with a fixed Spanish header dictionary. Reading the
//! file's bytes is the pipeline's single async suspension point; everything
//! after that is synchronous.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// One raw export row: column label → cell value. Blank cells are absent.
pub type RawRow = HashMap<String, String>;

// Column labels are an exact, case-sensitive contract with the export.
pub const COL_RUT: &str = "Rut paciente";
pub const COL_NOMBRE: &str = "Nombre";
pub const COL_CORREO: &str = "Correo";
pub const COL_CELULAR: &str = "Celular";
pub const COL_SERVICIO: &str = "Servicio";
pub const COL_FECHA_SESION: &str = "Fecha Sesión";
pub const COL_FECHA_PAGO: &str = "Fecha Pago";
pub const COL_MEDIO_PAGO: &str = "Medio de Pago";
pub const COL_MONTO: &str = "Monto";
pub const COL_MONTO_FINAL: &str = "Monto Final";
pub const COL_FECHA_ABONO: &str = "Fecha Abono";

/// Columns a usable export must carry in its header row.
const REQUIRED_COLUMNS: [&str; 3] = [COL_RUT, COL_FECHA_SESION, COL_MONTO];

pub struct SessionReader;

impl SessionReader {
    /// Read and parse an export file into raw rows.
    pub async fn load(path: &Path) -> Result<Vec<RawRow>> {
        let bytes = Self::read_file(path).await?;
        Self::parse_rows(&bytes)
    }

    /// Read the export file's bytes.
    pub async fn read_file(path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read export file: {}", path.display()))
    }

    /// Parse CSV bytes into label→value rows.
    ///
    /// Fails as a whole when the file has no header row or the header lacks a
    /// required column; per-row problems are left to the normalizer.
    pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawRow>> {
        let bytes = strip_bom(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .context("Export file has no header row")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                anyhow::bail!("Export file is missing required column: {}", required);
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("Malformed record in export file")?;
            let mut row = RawRow::new();
            for (i, header) in headers.iter().enumerate() {
                if let Some(value) = record.get(i) {
                    if !value.is_empty() {
                        row.insert(header.clone(), value.to_string());
                    }
                }
            }
            rows.push(row);
        }

        info!(rows = rows.len(), "Parsed export file");
        Ok(rows)
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(bytes)
}
