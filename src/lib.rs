//! Nutridash Library
//!
//! Analytics engine for clinic session exports. Nutridash ingests the flat
//! agenda/billing export produced by the scheduling system (one row per
//! billable session) and derives the business metrics a practice actually
//! tracks: unique-patient roster, retention, inactivity, the twelve-month
//! trend, service popularity, price-point distribution and payment-method
//! mix, plus an outreach CSV of patients who have gone quiet.
//!
//! ## Data Flow
//!
//! The pipeline runs strictly left to right:
//!
//! 1. **Ingestion**: [`ingest::SessionReader`] - reads the export file and
//!    yields raw label→value rows
//! 2. **Normalization**: [`normalize::RowNormalizer`] - validates and coerces
//!    each raw row into a typed [`Session`], dropping unusable rows
//! 3. **Aggregation**: [`aggregate`] - per-patient, per-month and categorical
//!    folds over the session list
//! 4. **Synthesis**: [`Report::build`] - combines the aggregates into one
//!    immutable report snapshot
//! 5. **Output**: [`display::ReportDisplayManager`] renders the report;
//!    [`export::InactiveRosterExporter`] produces the outreach CSV
//!
//! Every ingestion recomputes the report from scratch; there is no
//! incremental update and no state shared between runs.
//!
//! ## Key Types
//!
//! - [`Session`] - one normalized billable visit record
//! - [`PatientProfile`] - accumulated per-patient summary
//! - [`Report`] - the full aggregate snapshot consumed by presentation and
//!   by the roster exporter
//! - [`ClinicAnalyzer`] - coordinator tying ingestion, aggregation and
//!   output together

pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod date_parser;
pub mod display;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod report;
pub mod utils;

pub use analyzer::ClinicAnalyzer;
pub use models::*;
