//! Calendar-month trend series over a trailing twelve-month window.

use super::{first_of_month, months_before};
use crate::date_parser::DateParser;
use crate::models::{MonthBucket, Session};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

pub const TREND_MONTHS: u32 = 12;

pub struct TemporalAggregator;

impl TemporalAggregator {
    /// Exactly twelve buckets for the months `[today−11 .. today]`, oldest
    /// first, zero-filled when a month had no sessions. Matching is on
    /// (calendar month, calendar year), not a rolling 30-day window.
    pub fn aggregate(sessions: &[Session], today: NaiveDate) -> Vec<MonthBucket> {
        (0..TREND_MONTHS)
            .rev()
            .map(|back| {
                let month = months_before(first_of_month(today), back);
                Self::bucket_for(sessions, month)
            })
            .collect()
    }

    fn bucket_for(sessions: &[Session], month: NaiveDate) -> MonthBucket {
        let in_month: Vec<&Session> = sessions
            .iter()
            .filter(|s| {
                s.fecha_sesion.month() == month.month() && s.fecha_sesion.year() == month.year()
            })
            .collect();

        let pacientes: HashSet<&str> = in_month.iter().map(|s| s.rut.as_str()).collect();
        let ingresos: f64 = in_month.iter().map(|s| s.monto).sum();
        let atenciones = in_month.len() as u32;

        MonthBucket {
            mes: DateParser::month_label(month),
            atenciones,
            pacientes: pacientes.len() as u32,
            ingresos,
            promedio_atencion: if atenciones > 0 {
                ingresos / atenciones as f64
            } else {
                0.0
            },
        }
    }
}
