//! Validation error types and form field parsers
//!
//! Form values arrive as raw strings. Each parser trims its input and either
//! returns a typed value or a `ValidationError` naming the offending field.

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{NaiveDate, NaiveDateTime};

/// Largest amount a NUMERIC(12, 2) column can hold
const MAX_PRICE: &str = "9999999999.99";

/// Integer digits allowed by NUMERIC(12, 2)
const MAX_PRICE_DIGITS: i64 = 10;

/// Decimal places kept on prices
const PRICE_SCALE: i64 = 2;

/// Timestamp formats accepted from forms (`datetime-local` inputs first)
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Validation error for form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Value does not parse (id, date, timestamp)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Price is not a number
    NotANumber { field: &'static str },

    /// Price below zero
    Negative { field: &'static str },

    /// Price exceeds the storage precision
    OutOfRange { field: &'static str, max: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::NotANumber { field } => write!(f, "{} must be a number", field),
            Self::Negative { field } => write!(f, "{} cannot be negative", field),
            Self::OutOfRange { field, max } => {
                write!(f, "{} cannot exceed {}", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed, non-empty text.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Trimmed text, `None` when blank.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Surrogate key chosen from a `<select>`.
pub fn parse_id(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    let raw = required(field, value)?;
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ValidationError::InvalidFormat {
            field,
            reason: "must reference an existing record",
        })
}

/// Non-negative price with at most two decimal places kept.
///
/// Magnitude is checked on the parsed digits before any rescaling, so an
/// exponent like `1e1000000000` fails without building the full integer.
pub fn parse_price(field: &'static str, value: &str) -> Result<BigDecimal, ValidationError> {
    let raw = required(field, value)?;
    let price = BigDecimal::from_str(&raw).map_err(|_| ValidationError::NotANumber { field })?;

    match price.sign() {
        Sign::Minus => return Err(ValidationError::Negative { field }),
        Sign::NoSign => return Ok(BigDecimal::new(BigInt::from(0), PRICE_SCALE)),
        Sign::Plus => {}
    }

    // Digits left of the decimal point; zero or below for fractions
    let (_, scale) = price.as_bigint_and_exponent();
    let magnitude = price.digits() as i64 - scale;
    if magnitude > MAX_PRICE_DIGITS {
        return Err(ValidationError::OutOfRange {
            field,
            max: MAX_PRICE,
        });
    }
    // Below 0.001 rounds to zero
    if magnitude < -PRICE_SCALE {
        return Ok(BigDecimal::new(BigInt::from(0), PRICE_SCALE));
    }

    let price = price.with_scale_round(PRICE_SCALE, RoundingMode::HalfUp);
    // MAX_PRICE is a literal, parsing cannot fail
    if BigDecimal::from_str(MAX_PRICE).map_or(false, |max| price > max) {
        return Err(ValidationError::OutOfRange {
            field,
            max: MAX_PRICE,
        });
    }

    Ok(price)
}

/// Timestamp from a `datetime-local` input; a bare date means midnight.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = required(field, value)?;

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&raw, format) {
            return Ok(ts);
        }
    }

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(ValidationError::InvalidFormat {
            field,
            reason: "expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
        })
}

/// ISO date (`YYYY-MM-DD`).
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "expected YYYY-MM-DD",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Negative { field: "start price" };
        assert_eq!(err.to_string(), "start price cannot be negative");

        let err = ValidationError::Empty { field: "name" };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn required_trims() {
        assert_eq!(required("name", "  Vase ").unwrap(), "Vase");
        assert_eq!(
            required("name", "   ").unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional(""), None);
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" note "), Some("note".to_owned()));
    }

    #[test]
    fn ids() {
        assert_eq!(parse_id("auction", "12").unwrap(), 12);
        assert!(matches!(
            parse_id("auction", "").unwrap_err(),
            ValidationError::Empty { .. }
        ));
        assert!(matches!(
            parse_id("auction", "abc").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(parse_id("auction", "0").is_err());
    }

    #[test]
    fn prices() {
        assert_eq!(
            parse_price("price", "100").unwrap(),
            BigDecimal::from_str("100.00").unwrap()
        );
        assert_eq!(
            parse_price("price", "0.005").unwrap(),
            BigDecimal::from_str("0.01").unwrap()
        );
        assert_eq!(
            parse_price("price", "ten").unwrap_err(),
            ValidationError::NotANumber { field: "price" }
        );
        assert_eq!(
            parse_price("price", "-1").unwrap_err(),
            ValidationError::Negative { field: "price" }
        );
        assert!(matches!(
            parse_price("price", "10000000000").unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
        assert!(parse_price("price", "0").is_ok());
    }

    #[test]
    fn price_exponents_checked_before_rescaling() {
        assert_eq!(
            parse_price("start price", "1e1000000000").unwrap_err(),
            ValidationError::OutOfRange {
                field: "start price",
                max: MAX_PRICE
            }
        );
        assert_eq!(
            parse_price("start price", "-1e1000000000").unwrap_err(),
            ValidationError::Negative {
                field: "start price"
            }
        );
        assert_eq!(
            parse_price("start price", "1e-1000000000").unwrap(),
            BigDecimal::from_str("0.00").unwrap()
        );
        assert_eq!(
            parse_price("start price", "0e1000000000").unwrap(),
            BigDecimal::from_str("0.00").unwrap()
        );
        assert_eq!(
            parse_price("start price", "1.5e2").unwrap(),
            BigDecimal::from_str("150.00").unwrap()
        );
        assert!(matches!(
            parse_price("start price", "9999999999.995").unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
        assert!(parse_price("start price", "9999999999.99").is_ok());
    }

    #[test]
    fn timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("starts at", "2024-05-01T18:00").unwrap(), expected);
        assert_eq!(parse_timestamp("starts at", "2024-05-01 18:00:00").unwrap(), expected);

        let midnight = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("sold at", "2024-05-02").unwrap(), midnight);

        assert!(matches!(
            parse_timestamp("sold at", "yesterday").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("start", "2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_date("start", "05/01/2024").is_err());
    }
}
