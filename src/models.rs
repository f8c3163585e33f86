//! Core Data Models
//!
//! This module defines the data structures the aggregation pipeline produces,
//! from normalized session records to the final report snapshot.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: label→value rows from the export file (see [`crate::ingest`])
//! 2. **Normalization**: [`Session`] - one validated, typed visit record
//! 3. **Aggregation**: [`PatientProfile`], [`MonthBucket`], [`ServiceStat`],
//!    [`PriceBucket`], [`PaymentMethodStat`]
//! 4. **Output**: [`Report`] - the immutable snapshot handed to presentation
//!    and to the roster exporter
//!
//! Serialized field names mirror the dashboard's wire format (camelCase,
//! Spanish domain vocabulary), so `--json` output plugs straight into the
//! existing front end.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// One normalized billable visit. Immutable once created.
///
/// Invariant: `rut` is non-empty and `fecha_sesion` parsed successfully;
/// rows that fail either are dropped during normalization, never stored.
/// `monto_final` and `fecha_abono` are carried from the export but feed no
/// derived metric.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub rut: String,
    pub nombre: String,
    pub correo: String,
    pub celular: String,
    pub servicio: String,
    #[serde(rename = "fechaSesion")]
    pub fecha_sesion: NaiveDate,
    #[serde(rename = "fechaPago")]
    pub fecha_pago: Option<NaiveDate>,
    #[serde(rename = "medioPago")]
    pub medio_pago: String,
    pub monto: f64,
    #[serde(rename = "montoFinal")]
    pub monto_final: f64,
    #[serde(rename = "fechaAbono")]
    pub fecha_abono: Option<NaiveDate>,
}

/// Accumulated per-patient summary, one per distinct RUT.
///
/// Identity fields (`nombre`, `correo`, `celular`) come from the first-seen
/// session for that RUT and are never overwritten by later rows. That is the
/// documented contract with the export, not an accident.
#[derive(Debug, Clone, Serialize)]
pub struct PatientProfile {
    pub rut: String,
    pub nombre: String,
    pub correo: String,
    pub celular: String,
    #[serde(rename = "primeraVisita")]
    pub primera_visita: NaiveDate,
    #[serde(rename = "ultimaVisita")]
    pub ultima_visita: NaiveDate,
    #[serde(rename = "totalAtenciones")]
    pub total_atenciones: u32,
    #[serde(rename = "totalGastado")]
    pub total_gastado: f64,
    pub servicios: BTreeSet<String>,
}

impl PatientProfile {
    /// Seed a profile from the first session seen for a RUT.
    pub fn from_session(session: &Session) -> Self {
        Self {
            rut: session.rut.clone(),
            nombre: session.nombre.clone(),
            correo: session.correo.clone(),
            celular: session.celular.clone(),
            primera_visita: session.fecha_sesion,
            ultima_visita: session.fecha_sesion,
            total_atenciones: 1,
            total_gastado: session.monto,
            servicios: BTreeSet::from([session.servicio.clone()]),
        }
    }

    /// Fold a later session for the same RUT into the profile.
    /// Date ties keep the existing value; identity fields stay first-seen.
    pub fn absorb(&mut self, session: &Session) {
        self.total_atenciones += 1;
        self.total_gastado += session.monto;
        self.servicios.insert(session.servicio.clone());
        if session.fecha_sesion > self.ultima_visita {
            self.ultima_visita = session.fecha_sesion;
        }
        if session.fecha_sesion < self.primera_visita {
            self.primera_visita = session.fecha_sesion;
        }
    }

    pub fn promedio_por_atencion(&self) -> f64 {
        if self.total_atenciones == 0 {
            return 0.0;
        }
        self.total_gastado / self.total_atenciones as f64
    }
}

/// One calendar month of the trailing twelve-month trend, zero-filled when
/// the month had no sessions.
#[derive(Debug, Clone, Serialize)]
pub struct MonthBucket {
    pub mes: String,
    pub atenciones: u32,
    pub pacientes: u32,
    pub ingresos: f64,
    #[serde(rename = "promedioAtencion")]
    pub promedio_atencion: f64,
}

/// Per-service ranking entry.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStat {
    pub nombre: String,
    pub cantidad: u32,
    pub ingresos: f64,
    #[serde(rename = "pacientesUnicos")]
    pub pacientes_unicos: u32,
    #[serde(rename = "ingresoPromedio")]
    pub ingreso_promedio: f64,
}

/// Per-price-point ranking entry. Only price points repeated often enough
/// to clear the frequency floor are emitted.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBucket {
    pub precio: String,
    #[serde(skip)]
    pub monto: f64,
    pub cantidad: u32,
    pub porcentaje: f64,
}

/// Per-payment-method ranking entry.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodStat {
    pub medio: String,
    pub cantidad: u32,
    pub porcentaje: f64,
}

/// The full aggregate snapshot for one export file. Recomputed from scratch
/// on every ingestion; a new upload fully replaces the previous report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(rename = "totalAtenciones")]
    pub total_atenciones: u32,
    #[serde(rename = "totalPacientes")]
    pub total_pacientes: u32,
    #[serde(rename = "pacientesInactivos")]
    pub pacientes_inactivos: Vec<PatientProfile>,
    #[serde(rename = "pacientesEsteMes")]
    pub pacientes_este_mes: u32,
    #[serde(rename = "tasaRetencion")]
    pub tasa_retencion: f64,
    #[serde(rename = "totalIngresos")]
    pub total_ingresos: f64,
    #[serde(rename = "promedioMonto")]
    pub promedio_monto: f64,
    #[serde(rename = "valorPromedioPorPaciente")]
    pub valor_promedio_por_paciente: f64,
    #[serde(rename = "monthlyData")]
    pub monthly_data: Vec<MonthBucket>,
    #[serde(rename = "serviciosData")]
    pub servicios: Vec<ServiceStat>,
    #[serde(rename = "preciosChart")]
    pub precios: Vec<PriceBucket>,
    #[serde(rename = "mediosPagoChart")]
    pub medios_pago: Vec<PaymentMethodStat>,
    #[serde(rename = "allPatients")]
    pub pacientes: Vec<PatientProfile>,
    #[serde(rename = "allRecords")]
    pub sesiones: Vec<Session>,
}
