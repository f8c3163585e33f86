//! Metrics Synthesizer: combines the aggregator outputs into one immutable
//! [`Report`] snapshot. No grouping logic of its own; this is where every
//! division-based metric gets its zero-denominator guard, so presentation
//! code never sees a NaN.

use crate::aggregate::categorical::CategoricalAggregator;
use crate::aggregate::patients::PatientAggregator;
use crate::aggregate::temporal::TemporalAggregator;
use crate::models::{Report, Session};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

impl Report {
    /// Build the full report from the normalized session list.
    /// `today` anchors the trend window, the current-month count and the
    /// inactivity cutoff; it is always passed in, never read from the clock.
    pub fn build(sessions: Vec<Session>, today: NaiveDate) -> Report {
        let pacientes = PatientAggregator::aggregate(&sessions);
        let pacientes_inactivos = PatientAggregator::inactive(&pacientes, today);
        let tasa_retencion = PatientAggregator::retention_rate(&pacientes);

        let monthly_data = TemporalAggregator::aggregate(&sessions, today);
        let servicios = CategoricalAggregator::services(&sessions);
        let precios = CategoricalAggregator::prices(&sessions);
        let medios_pago = CategoricalAggregator::payment_methods(&sessions);

        let total_atenciones = sessions.len() as u32;
        let total_pacientes = pacientes.len() as u32;
        let total_ingresos: f64 = sessions.iter().map(|s| s.monto).sum();

        let pacientes_este_mes = sessions
            .iter()
            .filter(|s| {
                s.fecha_sesion.month() == today.month() && s.fecha_sesion.year() == today.year()
            })
            .map(|s| s.rut.as_str())
            .collect::<HashSet<_>>()
            .len() as u32;

        debug!(
            total_atenciones,
            total_pacientes,
            inactivos = pacientes_inactivos.len(),
            "Report assembled"
        );

        Report {
            total_atenciones,
            total_pacientes,
            pacientes_inactivos,
            pacientes_este_mes,
            tasa_retencion,
            total_ingresos,
            promedio_monto: safe_div(total_ingresos, total_atenciones),
            valor_promedio_por_paciente: safe_div(total_ingresos, total_pacientes),
            monthly_data,
            servicios,
            precios,
            medios_pago,
            pacientes,
            sesiones: sessions,
        }
    }
}

fn safe_div(numerator: f64, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}
