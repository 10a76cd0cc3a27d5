//! Local date formatting for reports

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Report date format (`dd/mm/yyyy`)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// `dd/mm/yyyy` of an instant in the given time zone
pub fn format_date(instant: &DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format(DATE_FORMAT).to_string()
}

/// Parse an IANA zone name, falling back to UTC with a warning
pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!(timezone = %name, "Unknown time zone, using UTC");
        Tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date_uses_local_day() {
        // 01:30 UTC is still the previous evening in São Paulo (UTC-3)
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap();
        assert_eq!(format_date(&instant, chrono_tz::America::Sao_Paulo), "09/03/2024");
        assert_eq!(format_date(&instant, Tz::UTC), "10/03/2024");
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("America/Sao_Paulo"), chrono_tz::America::Sao_Paulo);
        assert_eq!(parse_timezone("Nowhere/Atlantis"), Tz::UTC);
    }
}
