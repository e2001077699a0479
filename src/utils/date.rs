use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional work date; `None` or a blank string means "today".
pub fn parse_optional_date(s: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match s.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_date(v)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_dates() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2025-06-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert!(matches!(
            parse_optional_date(Some("01/06/2025")),
            Err(AppError::InvalidDate(_))
        ));
    }
}
