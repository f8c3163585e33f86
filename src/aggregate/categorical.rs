//! Categorical group-by-and-rank pipelines: service popularity, price-point
//! distribution and payment-method mix.
//!
//! Percentages are kept at full precision here; rounding to one decimal
//! happens at the presentation edge.

use crate::models::{PaymentMethodStat, PriceBucket, ServiceStat, Session};
use crate::utils::format_clp;
use std::collections::{HashMap, HashSet};

pub const TOP_SERVICES: usize = 10;
pub const TOP_PRICES: usize = 8;

/// A price point must repeat more than this many times to chart.
pub const PRICE_FREQUENCY_FLOOR: u32 = 10;

/// Label for sessions with no payment method recorded.
pub const MEDIO_SIN_ESPECIFICAR: &str = "Sin especificar";

pub struct CategoricalAggregator;

impl CategoricalAggregator {
    /// Group by service label (the empty label is its own group), rank by
    /// session count descending, keep the top 10.
    pub fn services(sessions: &[Session]) -> Vec<ServiceStat> {
        struct Acc {
            cantidad: u32,
            ingresos: f64,
            ruts: HashSet<String>,
        }

        let mut groups: HashMap<&str, Acc> = HashMap::new();
        for session in sessions {
            let acc = groups.entry(session.servicio.as_str()).or_insert(Acc {
                cantidad: 0,
                ingresos: 0.0,
                ruts: HashSet::new(),
            });
            acc.cantidad += 1;
            acc.ingresos += session.monto;
            acc.ruts.insert(session.rut.clone());
        }

        let mut stats: Vec<ServiceStat> = groups
            .into_iter()
            .map(|(nombre, acc)| ServiceStat {
                nombre: nombre.to_string(),
                cantidad: acc.cantidad,
                ingresos: acc.ingresos,
                pacientes_unicos: acc.ruts.len() as u32,
                ingreso_promedio: acc.ingresos / acc.cantidad as f64,
            })
            .collect();

        stats.sort_by(|a, b| {
            b.cantidad
                .cmp(&a.cantidad)
                .then_with(|| a.nombre.cmp(&b.nombre))
        });
        stats.truncate(TOP_SERVICES);
        stats
    }

    /// Group by the exact amount (bit-level equality, no rounding or
    /// binning), keep points repeated more than the frequency floor, rank by
    /// count descending, top 8. An empty result just means nothing repeated
    /// often enough.
    pub fn prices(sessions: &[Session]) -> Vec<PriceBucket> {
        let total = sessions.len();

        let mut groups: HashMap<u64, (f64, u32)> = HashMap::new();
        for session in sessions {
            let entry = groups
                .entry(session.monto.to_bits())
                .or_insert((session.monto, 0));
            entry.1 += 1;
        }

        let mut buckets: Vec<PriceBucket> = groups
            .into_values()
            .filter(|(_, cantidad)| *cantidad > PRICE_FREQUENCY_FLOOR)
            .map(|(monto, cantidad)| PriceBucket {
                precio: format!("${}", format_clp(monto)),
                monto,
                cantidad,
                porcentaje: cantidad as f64 / total as f64 * 100.0,
            })
            .collect();

        buckets.sort_by(|a, b| {
            b.cantidad.cmp(&a.cantidad).then_with(|| {
                a.monto
                    .partial_cmp(&b.monto)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        buckets.truncate(TOP_PRICES);
        buckets
    }

    /// Group by payment method, labeling the empty method
    /// "Sin especificar". Ranked by count descending, no truncation.
    pub fn payment_methods(sessions: &[Session]) -> Vec<PaymentMethodStat> {
        let total = sessions.len();

        let mut groups: HashMap<&str, u32> = HashMap::new();
        for session in sessions {
            let medio = if session.medio_pago.is_empty() {
                MEDIO_SIN_ESPECIFICAR
            } else {
                session.medio_pago.as_str()
            };
            *groups.entry(medio).or_insert(0) += 1;
        }

        let mut stats: Vec<PaymentMethodStat> = groups
            .into_iter()
            .map(|(medio, cantidad)| PaymentMethodStat {
                medio: medio.to_string(),
                cantidad,
                porcentaje: cantidad as f64 / total as f64 * 100.0,
            })
            .collect();

        stats.sort_by(|a, b| {
            b.cantidad
                .cmp(&a.cantidad)
                .then_with(|| a.medio.cmp(&b.medio))
        });
        stats
    }
}
