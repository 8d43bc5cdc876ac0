//! JSON request/response helpers shared by the admin handlers.

use axum::extract::FromRequest;
use serde::{Deserialize, Deserializer, Serialize};
use time::{macros::format_description, Date};

use crate::error::AppError;

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// `Json` body extractor whose rejections render as `{"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Record id as sent by the dashboard: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    pub fn parse(&self) -> Option<i64> {
        match self {
            IdInput::Number(n) => Some(*n),
            IdInput::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Resolve an optional id field, rejecting absent, blank and non-numeric values alike.
pub fn require_id(id: Option<&IdInput>, msg: &str) -> Result<i64, AppError> {
    id.and_then(IdInput::parse)
        .ok_or_else(|| AppError::validation(msg))
}

/// Lets `Option<Option<T>>` tell a missing field (`None`) from an explicit null (`Some(None)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Trim and drop blank strings.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` date field. Blank means absent. A trailing time part
/// (`1990-05-14T00:00:00Z`) is ignored.
pub fn parse_date(field: &str, value: Option<String>) -> Result<Option<Date>, AppError> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    let day_part = raw.split('T').next().unwrap_or(&raw);
    Date::parse(day_part, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid {field} date, expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn id_accepts_numbers_and_numeric_strings() {
        let n: IdInput = serde_json::from_str("42").unwrap();
        let s: IdInput = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(n.parse(), Some(42));
        assert_eq!(s.parse(), Some(42));
        assert_eq!(IdInput::Text("abc".into()).parse(), None);
        assert_eq!(IdInput::Text("".into()).parse(), None);
    }

    #[test]
    fn require_id_rejects_missing() {
        let err = require_id(None, "Customer ID is required").unwrap_err();
        assert_eq!(err.to_string(), "Customer ID is required");
    }

    #[test]
    fn dates_parse_with_optional_time_part() {
        assert_eq!(parse_date("birthday", Some("1990-05-14".into())).unwrap(), Some(date!(1990 - 05 - 14)));
        assert_eq!(
            parse_date("birthday", Some("1990-05-14T00:00:00.000Z".into())).unwrap(),
            Some(date!(1990 - 05 - 14))
        );
        assert_eq!(parse_date("birthday", Some("  ".into())).unwrap(), None);
        assert_eq!(parse_date("birthday", None).unwrap(), None);
    }

    #[test]
    fn malformed_dates_are_validation_errors() {
        let err = parse_date("anniversary", Some("14/05/1990".into())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(parse_date("birthday", Some("1990-02-30".into())).is_err());
    }
}
