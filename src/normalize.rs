//! Row Normalizer: validates and coerces one raw export row into a typed
//! [`Session`].
//!
//! Rejection is a filter, not an error: rows missing the RUT, session date
//! or amount cell are dropped, as are rows whose session date fails to
//! parse. Optional dates that fail to parse simply stay absent, and numeric
//! cells that fail to parse coerce to 0.

use crate::date_parser::DateParser;
use crate::ingest::{self, RawRow};
use crate::models::Session;
use chrono::NaiveDate;
use tracing::{debug, warn};

pub struct RowNormalizer;

impl RowNormalizer {
    /// Normalize a full row list, dropping unusable rows.
    pub fn normalize_all(rows: &[RawRow]) -> Vec<Session> {
        let sessions: Vec<Session> = rows.iter().filter_map(Self::normalize).collect();

        let dropped = rows.len() - sessions.len();
        if dropped > 0 {
            warn!(
                dropped,
                kept = sessions.len(),
                "Dropped rows missing RUT, session date or amount"
            );
        }

        sessions
    }

    /// Pure function of one raw row. Returns None for rows the pipeline drops.
    pub fn normalize(row: &RawRow) -> Option<Session> {
        let rut = row.get(ingest::COL_RUT)?;
        let fecha_raw = row.get(ingest::COL_FECHA_SESION)?;
        row.get(ingest::COL_MONTO)?;

        let fecha_sesion = match DateParser::parse(fecha_raw) {
            Ok(date) => date,
            Err(_) => {
                debug!(rut = %rut, raw = %fecha_raw, "Dropping row with unparseable session date");
                return None;
            }
        };

        Some(Session {
            rut: rut.clone(),
            nombre: text_field(row, ingest::COL_NOMBRE),
            correo: text_field(row, ingest::COL_CORREO),
            celular: text_field(row, ingest::COL_CELULAR),
            servicio: text_field(row, ingest::COL_SERVICIO),
            fecha_sesion,
            fecha_pago: date_field(row, ingest::COL_FECHA_PAGO),
            medio_pago: text_field(row, ingest::COL_MEDIO_PAGO),
            monto: amount_field(row, ingest::COL_MONTO),
            monto_final: amount_field(row, ingest::COL_MONTO_FINAL),
            fecha_abono: date_field(row, ingest::COL_FECHA_ABONO),
        })
    }
}

fn text_field(row: &RawRow, label: &str) -> String {
    row.get(label).cloned().unwrap_or_default()
}

fn date_field(row: &RawRow, label: &str) -> Option<NaiveDate> {
    row.get(label).and_then(|raw| DateParser::parse(raw).ok())
}

fn amount_field(row: &RawRow, label: &str) -> f64 {
    row.get(label).map(|raw| parse_amount(raw)).unwrap_or(0.0)
}

/// Coerce an amount cell to a non-negative number; anything unparseable is 0.
/// Tolerates a "$" prefix and es-CL separators ("25.000,50") on top of plain
/// decimals.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = raw.trim().trim_start_matches('$').replace(' ', "");

    let parsed = cleaned.parse::<f64>().ok().or_else(|| {
        // "25.000,50" → "25000.50"; only reached when the plain parse failed,
        // so "25.000" keeps its plain-decimal reading
        cleaned.replace('.', "").replace(',', ".").parse::<f64>().ok()
    });

    match parsed {
        Some(value) if value.is_finite() => value.max(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{COL_FECHA_PAGO, COL_FECHA_SESION, COL_MONTO, COL_NOMBRE, COL_RUT};

    fn row(entries: &[(&str, &str)]) -> RawRow {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_row() -> RawRow {
        row(&[
            (COL_RUT, "11.111.111-1"),
            (COL_NOMBRE, "Ana Díaz"),
            (COL_FECHA_SESION, "14-jul-2025 16:40"),
            (COL_MONTO, "25000"),
        ])
    }

    #[test]
    fn test_normalize_valid_row() {
        let session = RowNormalizer::normalize(&valid_row()).unwrap();
        assert_eq!(session.rut, "11.111.111-1");
        assert_eq!(session.nombre, "Ana Díaz");
        assert_eq!(
            session.fecha_sesion,
            chrono::NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
        );
        assert_eq!(session.monto, 25000.0);
        // Absent cells default to empty / None / 0
        assert_eq!(session.servicio, "");
        assert!(session.fecha_pago.is_none());
        assert_eq!(session.monto_final, 0.0);
    }

    #[test]
    fn test_drops_row_without_rut() {
        let mut r = valid_row();
        r.remove(COL_RUT);
        assert!(RowNormalizer::normalize(&r).is_none());
    }

    #[test]
    fn test_drops_row_without_session_date() {
        let mut r = valid_row();
        r.remove(COL_FECHA_SESION);
        assert!(RowNormalizer::normalize(&r).is_none());
    }

    #[test]
    fn test_drops_row_without_amount_cell() {
        let mut r = valid_row();
        r.remove(COL_MONTO);
        assert!(RowNormalizer::normalize(&r).is_none());
    }

    #[test]
    fn test_drops_row_with_bad_session_date() {
        let mut r = valid_row();
        r.insert(COL_FECHA_SESION.to_string(), "mañana".to_string());
        assert!(RowNormalizer::normalize(&r).is_none());
    }

    #[test]
    fn test_bad_optional_date_stays_absent() {
        let mut r = valid_row();
        r.insert(COL_FECHA_PAGO.to_string(), "???".to_string());
        let session = RowNormalizer::normalize(&r).unwrap();
        assert!(session.fecha_pago.is_none());
    }

    #[test]
    fn test_unparseable_amount_coerces_to_zero() {
        let mut r = valid_row();
        r.insert(COL_MONTO.to_string(), "veinticinco mil".to_string());
        let session = RowNormalizer::normalize(&r).unwrap();
        assert_eq!(session.monto, 0.0);
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("25000"), 25000.0);
        assert_eq!(parse_amount("25000.5"), 25000.5);
        assert_eq!(parse_amount("$25000"), 25000.0);
        assert_eq!(parse_amount("25.000,50"), 25000.5);
        assert_eq!(parse_amount("-5000"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }

    #[test]
    fn test_normalize_all_counts_drops() {
        let rows = vec![valid_row(), row(&[(COL_RUT, "22.222.222-2")])];
        let sessions = RowNormalizer::normalize_all(&rows);
        assert_eq!(sessions.len(), 1);
    }
}
