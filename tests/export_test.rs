//! Round-trip tests for the inactive-roster export.

mod common;

use chrono::NaiveDate;
use nutridash::export::{InactiveRosterExporter, ROSTER_HEADERS};
use nutridash::ingest::SessionReader;
use nutridash::normalize::RowNormalizer;
use nutridash::utils::parse_clp;
use nutridash::Report;
use tempfile::tempdir;

fn inactive_report(today: NaiveDate) -> Report {
    let rows = vec![
        "11.111.111-1,Ana Díaz,ana@mail.com,+56911111111,Consulta Nutricional,01-mar-2025,,Webpay,20000,20000,",
        "11.111.111-1,Ana Díaz,ana@mail.com,+56911111111,Control,01-abr-2025,,Webpay,30000,30000,",
        "22.222.222-2,Benito Rojas,,,Consulta Nutricional,10-jul-2025,,Efectivo,25000,25000,",
    ];
    let dir = tempdir().expect("tempdir");
    let path = common::write_export(dir.path(), &rows);
    let bytes = std::fs::read(path).expect("read fixture");
    let raw = SessionReader::parse_rows(&bytes).expect("parse fixture");
    Report::build(RowNormalizer::normalize_all(&raw), today)
}

#[test]
fn export_round_trips_through_csv() {
    let today = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
    let report = inactive_report(today);
    assert_eq!(report.pacientes_inactivos.len(), 1);

    let export = InactiveRosterExporter::export(&report.pacientes_inactivos, today).unwrap();
    assert_eq!(export.filename, "pacientes_inactivos_2025-07-14.csv");
    assert!(export.payload.starts_with('\u{feff}'));

    // Re-parse the payload and recover the roster fields
    let body = export.payload.trim_start_matches('\u{feff}');
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), ROSTER_HEADERS.len());
    assert_eq!(&headers[0], "RUT");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);

    let row = &records[0];
    assert_eq!(&row[0], "11.111.111-1");
    assert_eq!(&row[1], "Ana Díaz");
    assert_eq!(&row[4], "01-04-2025");
    // 104 whole days between 01-04-2025 and 14-07-2025
    assert_eq!(&row[5], "104");
    assert_eq!(&row[6], "2");
    assert_eq!(parse_clp(&row[7]), Some(50000.0));
    assert_eq!(parse_clp(&row[8]), Some(25000.0));
    assert_eq!(&row[9], "Consulta Nutricional; Control");
}

#[test]
fn export_rounding_is_bounded_to_the_peso() {
    let today = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
    let rows = vec![
        "11.111.111-1,Ana Díaz,,,Consulta,01-ene-2025,,,10000,,",
        "11.111.111-1,Ana Díaz,,,Consulta,01-feb-2025,,,10000,,",
        "11.111.111-1,Ana Díaz,,,Consulta,01-mar-2025,,,5000,,",
    ];
    let dir = tempdir().expect("tempdir");
    let path = common::write_export(dir.path(), &rows);
    let bytes = std::fs::read(path).expect("read fixture");
    let report = Report::build(
        RowNormalizer::normalize_all(&SessionReader::parse_rows(&bytes).unwrap()),
        today,
    );

    let export = InactiveRosterExporter::export(&report.pacientes_inactivos, today).unwrap();
    let body = export.payload.trim_start_matches('\u{feff}');
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let record = reader.records().next().unwrap().unwrap();

    // 25000 / 3 = 8333.33…, exported to the nearest peso
    let exported = parse_clp(&record[8]).unwrap();
    let exact = 25000.0 / 3.0;
    assert!((exported - exact).abs() <= 1.0);
}

#[test]
fn write_to_creates_the_roster_file() {
    let today = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
    let report = inactive_report(today);
    let export = InactiveRosterExporter::export(&report.pacientes_inactivos, today).unwrap();

    let dir = tempdir().expect("tempdir");
    let path = InactiveRosterExporter::write_to(&export, dir.path()).unwrap();

    assert!(path.ends_with("pacientes_inactivos_2025-07-14.csv"));
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written, export.payload);
}
