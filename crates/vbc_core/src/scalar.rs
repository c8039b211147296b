//! Per-scalar-kind parse and format routines.
//!
//! Scalars travel through text as locale-invariant decimal literals
//! (optional sign, digits, optional fraction and exponent for floating
//! kinds) and through binary as their native-endian fixed-width encoding
//! with no padding between components.

use std::fmt::Write;

use half::f16;

use crate::error::ElementError;

/// How floating-point components are rendered back to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFormat {
    /// A fixed number of decimal digits. Fast to emit, lossy beyond the
    /// requested precision.
    Fixed(usize),
    /// The shortest representation that re-parses to the same value.
    RoundTrip,
}

impl Default for NumericFormat {
    fn default() -> Self {
        NumericFormat::Fixed(1)
    }
}

/// Storage kind of one scalar component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    F32,
    F16,
    U8,
    U16,
    U32,
}

impl ScalarKind {
    /// Byte width of one component.
    pub const fn size(self) -> usize {
        match self {
            ScalarKind::F32 | ScalarKind::U32 => 4,
            ScalarKind::F16 | ScalarKind::U16 => 2,
            ScalarKind::U8 => 1,
        }
    }

    /// Type name used in error messages.
    pub const fn target_name(self) -> &'static str {
        match self {
            ScalarKind::F32 => "f32",
            ScalarKind::F16 => "f16",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
        }
    }

    /// Parse one token and write its native-endian bytes into `out`.
    ///
    /// `out` must be exactly [`size`](Self::size) bytes. Nothing is written
    /// on failure.
    pub fn parse(self, token: &str, out: &mut [u8]) -> Result<(), ElementError> {
        debug_assert_eq!(out.len(), self.size());
        match self {
            ScalarKind::F32 => {
                let value = parse_f32(token)?;
                out.copy_from_slice(&value.to_ne_bytes());
            }
            ScalarKind::F16 => {
                // Half-precision has no literal syntax of its own; tokens
                // are read as f32 and narrowed on store.
                let value: f32 = parse_token(token, "f16")?;
                out.copy_from_slice(&f16::from_f32(value).to_ne_bytes());
            }
            ScalarKind::U8 => {
                let value: u8 = parse_token(token, "u8")?;
                out.copy_from_slice(&value.to_ne_bytes());
            }
            ScalarKind::U16 => {
                let value: u16 = parse_token(token, "u16")?;
                out.copy_from_slice(&value.to_ne_bytes());
            }
            ScalarKind::U32 => {
                let value: u32 = parse_token(token, "u32")?;
                out.copy_from_slice(&value.to_ne_bytes());
            }
        }
        Ok(())
    }

    /// Format the component stored in `bytes` (native-endian) into `out`.
    ///
    /// Integer kinds ignore the floating-point format.
    pub fn format(self, bytes: &[u8], format: NumericFormat, out: &mut String) {
        debug_assert_eq!(bytes.len(), self.size());
        match self {
            ScalarKind::F32 => {
                write_float(f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), format, out);
            }
            ScalarKind::F16 => {
                write_float(f16::from_ne_bytes([bytes[0], bytes[1]]).to_f32(), format, out);
            }
            ScalarKind::U8 => {
                let _ = write!(out, "{}", bytes[0]);
            }
            ScalarKind::U16 => {
                let _ = write!(out, "{}", u16::from_ne_bytes([bytes[0], bytes[1]]));
            }
            ScalarKind::U32 => {
                let _ = write!(out, "{}", u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
            }
        }
    }
}

pub(crate) fn parse_f32(token: &str) -> Result<f32, ElementError> {
    parse_token(token, "f32")
}

fn parse_token<T: std::str::FromStr>(token: &str, target: &'static str) -> Result<T, ElementError> {
    token.parse().map_err(|_| ElementError::NumberFormat {
        token: token.to_string(),
        target,
    })
}

pub(crate) fn write_float(value: f32, format: NumericFormat, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = match format {
        NumericFormat::Fixed(decimals) => write!(out, "{:.*}", decimals, value),
        NumericFormat::RoundTrip => write!(out, "{}", value),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_to_vec(kind: ScalarKind, token: &str) -> Result<Vec<u8>, ElementError> {
        let mut out = vec![0u8; kind.size()];
        kind.parse(token, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_parse_f32_exponent() {
        let bytes = parse_to_vec(ScalarKind::F32, "-1.5e2").unwrap();
        assert_eq!(f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), -150.0);
    }

    #[test]
    fn test_parse_u8_range() {
        assert_eq!(parse_to_vec(ScalarKind::U8, "255").unwrap(), vec![255]);

        // Out of range is an error, never wrapped or zeroed
        let err = parse_to_vec(ScalarKind::U8, "256").unwrap_err();
        assert_eq!(
            err,
            ElementError::NumberFormat {
                token: "256".to_string(),
                target: "u8",
            }
        );
    }

    #[test]
    fn test_malformed_token_is_not_zero() {
        let mut out = [0xAAu8; 4];
        let err = ScalarKind::F32.parse("abc", &mut out).unwrap_err();
        assert!(matches!(err, ElementError::NumberFormat { .. }));
        // Destination untouched on failure
        assert_eq!(out, [0xAA; 4]);
    }

    #[test]
    fn test_f16_roundtrip() {
        let bytes = parse_to_vec(ScalarKind::F16, "0.5").unwrap();
        let mut text = String::new();
        ScalarKind::F16.format(&bytes, NumericFormat::RoundTrip, &mut text);
        assert_eq!(text, "0.5");
    }

    #[test]
    fn test_fixed_format() {
        let bytes = 0.25f32.to_ne_bytes();
        let mut text = String::new();
        ScalarKind::F32.format(&bytes, NumericFormat::Fixed(1), &mut text);
        assert_eq!(text, "0.2");

        text.clear();
        ScalarKind::F32.format(&bytes, NumericFormat::RoundTrip, &mut text);
        assert_eq!(text, "0.25");
    }

    #[test]
    fn test_integer_format_ignores_float_options() {
        let bytes = 4242u16.to_ne_bytes();
        let mut text = String::new();
        ScalarKind::U16.format(&bytes, NumericFormat::Fixed(3), &mut text);
        assert_eq!(text, "4242");
    }
}
