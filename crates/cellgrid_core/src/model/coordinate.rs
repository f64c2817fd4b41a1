//! Coordinate validation policy.
//!
//! # Responsibility
//! - Turn loosely typed external coordinates into `CellIndex` values.
//! - Reject malformed coordinates before they reach storage.
//!
//! # Invariants
//! - Accepted coordinates are non-negative integers that fit in `u32`.
//! - Integral JSON numbers (`3`, `3.0`) and decimal digit strings (`"3"`)
//!   are accepted; everything else is rejected with a typed error.

use crate::model::cell::CellIndex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const FLOAT_TEXT_EXPONENT_THRESHOLD: f64 = 1e16;

/// Grid axis a coordinate belongs to. Only used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// External field name for this axis.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Row => "rowId",
            Self::Column => "colId",
        }
    }
}

/// Rejected coordinate input.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    Missing(Axis),
    NotAnInteger { axis: Axis, raw: String },
    Negative { axis: Axis, raw: String },
    OutOfRange { axis: Axis, raw: String },
}

impl CoordinateError {
    pub fn axis(&self) -> Axis {
        match self {
            Self::Missing(axis) => *axis,
            Self::NotAnInteger { axis, .. }
            | Self::Negative { axis, .. }
            | Self::OutOfRange { axis, .. } => *axis,
        }
    }
}

impl Display for CoordinateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(axis) => write!(f, "{} is required", axis.field_name()),
            Self::NotAnInteger { axis, raw } => {
                write!(f, "{} must be an integer, got `{raw}`", axis.field_name())
            }
            Self::Negative { axis, raw } => {
                write!(f, "{} must not be negative, got `{raw}`", axis.field_name())
            }
            Self::OutOfRange { axis, raw } => write!(
                f,
                "{} must be at most {}, got `{raw}`",
                axis.field_name(),
                CellIndex::MAX
            ),
        }
    }
}

impl Error for CoordinateError {}

/// Coordinate as it arrives in a request body, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawCoordinate {
    /// Applies the coordinate policy for `axis`.
    pub fn resolve(&self, axis: Axis) -> Result<CellIndex, CoordinateError> {
        match self {
            Self::Integer(value) => index_from_i64(axis, *value, &value.to_string()),
            Self::Float(value) => {
                let raw = float_text(*value);
                if !value.is_finite() || value.fract() != 0.0 {
                    return Err(CoordinateError::NotAnInteger { axis, raw });
                }
                if *value < 0.0 {
                    return Err(CoordinateError::Negative { axis, raw });
                }
                if *value > f64::from(CellIndex::MAX) {
                    return Err(CoordinateError::OutOfRange { axis, raw });
                }
                // Bounds and integrality are checked above.
                Ok(*value as CellIndex)
            }
            Self::Text(text) => parse_index(axis, text),
        }
    }
}

/// Resolves an optional body coordinate, treating absence as an error.
pub fn resolve_coordinate(
    axis: Axis,
    raw: Option<&RawCoordinate>,
) -> Result<CellIndex, CoordinateError> {
    match raw {
        Some(raw) => raw.resolve(axis),
        None => Err(CoordinateError::Missing(axis)),
    }
}

/// Parses a textual coordinate such as a URL path segment.
///
/// Surrounding whitespace is ignored. A leading `-` followed by digits is
/// reported as `Negative`; any other non-digit content is `NotAnInteger`.
pub fn parse_index(axis: Axis, raw: &str) -> Result<CellIndex, CoordinateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::Missing(axis));
    }

    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(CoordinateError::NotAnInteger {
            axis,
            raw: trimmed.to_string(),
        });
    }

    if trimmed.starts_with('-') {
        // "-0" is still zero.
        if digits.bytes().all(|byte| byte == b'0') {
            return Ok(0);
        }
        return Err(CoordinateError::Negative {
            axis,
            raw: trimmed.to_string(),
        });
    }

    digits
        .parse::<CellIndex>()
        .map_err(|_| CoordinateError::OutOfRange {
            axis,
            raw: trimmed.to_string(),
        })
}

/// Renders a float for error messages; large magnitudes use exponent form.
fn float_text(value: f64) -> String {
    if value.is_finite() && value.abs() < FLOAT_TEXT_EXPONENT_THRESHOLD {
        value.to_string()
    } else {
        format!("{value:e}")
    }
}

fn index_from_i64(axis: Axis, value: i64, raw: &str) -> Result<CellIndex, CoordinateError> {
    if value < 0 {
        return Err(CoordinateError::Negative {
            axis,
            raw: raw.to_string(),
        });
    }
    CellIndex::try_from(value).map_err(|_| CoordinateError::OutOfRange {
        axis,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_index, resolve_coordinate, Axis, CoordinateError, RawCoordinate};

    #[test]
    fn parse_index_accepts_digits_and_trims() {
        assert_eq!(parse_index(Axis::Row, "0").unwrap(), 0);
        assert_eq!(parse_index(Axis::Row, " 42 ").unwrap(), 42);
        assert_eq!(parse_index(Axis::Column, "-0").unwrap(), 0);
    }

    #[test]
    fn parse_index_rejects_malformed_input() {
        assert!(matches!(
            parse_index(Axis::Row, "abc"),
            Err(CoordinateError::NotAnInteger { axis: Axis::Row, .. })
        ));
        assert!(matches!(
            parse_index(Axis::Row, "1.5"),
            Err(CoordinateError::NotAnInteger { .. })
        ));
        assert!(matches!(
            parse_index(Axis::Column, "-3"),
            Err(CoordinateError::Negative { axis: Axis::Column, .. })
        ));
        assert!(matches!(
            parse_index(Axis::Column, "4294967296"),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert_eq!(
            parse_index(Axis::Row, "  "),
            Err(CoordinateError::Missing(Axis::Row))
        );
    }

    #[test]
    fn raw_coordinate_coerces_json_shapes() {
        let integer: RawCoordinate = serde_json::from_str("7").unwrap();
        let float: RawCoordinate = serde_json::from_str("7.0").unwrap();
        let text: RawCoordinate = serde_json::from_str("\"7\"").unwrap();

        assert_eq!(integer.resolve(Axis::Row).unwrap(), 7);
        assert_eq!(float.resolve(Axis::Row).unwrap(), 7);
        assert_eq!(text.resolve(Axis::Row).unwrap(), 7);
    }

    #[test]
    fn raw_coordinate_rejects_fractional_and_negative_numbers() {
        let fractional: RawCoordinate = serde_json::from_str("1.25").unwrap();
        let negative: RawCoordinate = serde_json::from_str("-1").unwrap();

        assert!(matches!(
            fractional.resolve(Axis::Column),
            Err(CoordinateError::NotAnInteger { .. })
        ));
        assert!(matches!(
            negative.resolve(Axis::Column),
            Err(CoordinateError::Negative { .. })
        ));
    }

    #[test]
    fn huge_float_is_reported_in_exponent_form() {
        let huge: RawCoordinate = serde_json::from_str("1e300").unwrap();

        let err = huge.resolve(Axis::Row).unwrap_err();
        assert_eq!(
            err,
            CoordinateError::OutOfRange {
                axis: Axis::Row,
                raw: "1e300".to_string(),
            }
        );
        assert!(err.to_string().len() < 64);
    }

    #[test]
    fn missing_coordinate_names_the_field() {
        let err = resolve_coordinate(Axis::Column, None).unwrap_err();
        assert_eq!(err.to_string(), "colId is required");
    }
}
