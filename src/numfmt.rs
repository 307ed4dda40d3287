//! Shortest-roundtrip double -> ECMAScript numeric literal text.
//!
//! This is the one piece of the printer that relies on an external
//! contract (given a finite `f64`, produce the shortest decimal string that
//! re-parses to the same value, per ECMA-262 `Number::toString`). We satisfy
//! it with `ryu_js`, the same crate the `boa` JS engine depends on for
//! exactly this purpose, rather than hand-rolling Grisu/Ryu ourselves.

use crate::error::AstError;

/// Formats a finite `f64` as the JS numeric literal text that would appear
/// in source. Returns [`AstError::PayloadOutOfRange`] for NaN/±infinity.
pub fn format_number(value: f64) -> Result<String, AstError> {
    if !value.is_finite() {
        return Err(AstError::PayloadOutOfRange {
            value: format!("{:?}", value),
        });
    }
    // ECMA-262 ToString(Number) maps -0 to the string "0".
    if value == 0.0 {
        return Ok("0".to_string());
    }
    let mut buf = ryu_js::Buffer::new();
    Ok(buf.format_finite(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integers_without_trailing_point() {
        assert_eq!(format_number(1.0).unwrap(), "1");
        assert_eq!(format_number(100.0).unwrap(), "100");
    }

    #[test]
    fn formats_negative_zero_as_zero() {
        assert_eq!(format_number(-0.0).unwrap(), "0");
    }

    #[test]
    fn formats_fractional_values() {
        assert_eq!(format_number(1.5).unwrap(), "1.5");
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(format_number(f64::NAN).is_err());
        assert!(format_number(f64::INFINITY).is_err());
        assert!(format_number(f64::NEG_INFINITY).is_err());
    }
}
