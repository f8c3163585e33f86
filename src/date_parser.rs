use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate};

/// Month abbreviations as the agenda export writes them ("14-jul-2025 16:40").
pub const MESES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Handles parsing the date formats that show up in agenda exports
pub struct DateParser;

impl DateParser {
    /// Parse a session/payment date string into a NaiveDate.
    /// Handles "DD-mes-YYYY" with an optional " HH:MM" tail, plus ISO dates,
    /// RFC 3339 timestamps and day-first numeric forms.
    pub fn parse(raw: &str) -> Result<NaiveDate> {
        let raw = raw.trim();
        // Drop the time-of-day tail if present
        let date_part = raw.split_whitespace().next().unwrap_or(raw);

        if let Some(date) = Self::parse_spanish(date_part) {
            return Ok(date);
        }

        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Ok(date);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(date_part) {
            return Ok(dt.date_naive());
        }

        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%d-%m-%Y") {
            return Ok(date);
        }

        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%d/%m/%Y") {
            return Ok(date);
        }

        anyhow::bail!("Failed to parse date: {}", raw)
    }

    fn parse_spanish(s: &str) -> Option<NaiveDate> {
        let mut parts = s.splitn(3, '-');
        let dia = parts.next()?.parse::<u32>().ok()?;
        let mes = parts.next()?.to_lowercase();
        let anio = parts.next()?.parse::<i32>().ok()?;

        let month = MESES.iter().position(|m| *m == mes)? as u32 + 1;
        NaiveDate::from_ymd_opt(anio, month, dia)
    }

    /// Short trend label for a month, "jul 25" style.
    pub fn month_label(date: NaiveDate) -> String {
        format!(
            "{} {:02}",
            MESES[date.month0() as usize],
            date.year().rem_euclid(100)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spanish() {
        let result = DateParser::parse("14-jul-2025");
        assert_eq!(result.unwrap(), NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    }

    #[test]
    fn test_parse_spanish_with_time() {
        let result = DateParser::parse("14-jul-2025 16:40");
        assert_eq!(result.unwrap(), NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    }

    #[test]
    fn test_parse_spanish_case_insensitive() {
        let result = DateParser::parse("01-ENE-2024");
        assert_eq!(result.unwrap(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_iso() {
        let result = DateParser::parse("2025-07-14");
        assert_eq!(result.unwrap(), NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    }

    #[test]
    fn test_parse_rfc3339() {
        let result = DateParser::parse("2025-07-14T16:40:00+00:00");
        assert_eq!(result.unwrap(), NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    }

    #[test]
    fn test_parse_day_first() {
        let result = DateParser::parse("14/07/2025");
        assert_eq!(result.unwrap(), NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    }

    #[test]
    fn test_parse_invalid_month() {
        assert!(DateParser::parse("14-xyz-2025").is_err());
    }

    #[test]
    fn test_parse_invalid_day() {
        assert!(DateParser::parse("32-ene-2025").is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateParser::parse("not a date").is_err());
    }

    #[test]
    fn test_month_label() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(DateParser::month_label(date), "jul 25");

        let date = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        assert_eq!(DateParser::month_label(date), "ene 05");
    }
}
