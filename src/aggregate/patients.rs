//! Patient roster fold: sessions → one profile per distinct RUT, plus the
//! inactivity and retention figures derived from the roster.

use super::months_before;
use crate::models::{PatientProfile, Session};
use chrono::NaiveDate;
use std::collections::HashMap;

/// A patient with no session in this many calendar months counts as inactive.
pub const INACTIVITY_MONTHS: u32 = 2;

pub struct PatientAggregator;

impl PatientAggregator {
    /// Single-pass keyed fold. Roster order is first appearance in the input;
    /// identity fields come from the first-seen session and are never
    /// re-merged across conflicting rows.
    pub fn aggregate(sessions: &[Session]) -> Vec<PatientProfile> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut roster: Vec<PatientProfile> = Vec::new();

        for session in sessions {
            match index.get(session.rut.as_str()) {
                Some(&i) => roster[i].absorb(session),
                None => {
                    index.insert(session.rut.as_str(), roster.len());
                    roster.push(PatientProfile::from_session(session));
                }
            }
        }

        roster
    }

    /// Profiles whose last visit precedes `today` minus the inactivity window.
    pub fn inactive(roster: &[PatientProfile], today: NaiveDate) -> Vec<PatientProfile> {
        let cutoff = months_before(today, INACTIVITY_MONTHS);
        roster
            .iter()
            .filter(|p| p.ultima_visita < cutoff)
            .cloned()
            .collect()
    }

    /// Share of patients with more than one visit, as a percentage.
    /// 0.0 for an empty roster, never NaN.
    pub fn retention_rate(roster: &[PatientProfile]) -> f64 {
        if roster.is_empty() {
            return 0.0;
        }
        let repeaters = roster.iter().filter(|p| p.total_atenciones > 1).count();
        repeaters as f64 / roster.len() as f64 * 100.0
    }
}
