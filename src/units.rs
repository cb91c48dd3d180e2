// Router Dashboard - Size Units
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Parsing of the human-readable sizes reported by the router.
//!
//! The router formats disk sizes as a decimal magnitude followed by a single
//! unit letter (`"10G"`, `"1.5T"`). Multipliers are powers of 1000, which keeps
//! the numbers consistent with what the router itself displays.

use thiserror::Error;

/// Errors returned by [`parse_size`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    /// The string is not `<number><letter>`.
    #[error("invalid size format: {0:?}")]
    Format(String),
    /// The unit letter is not one of B, K, M, G, T.
    #[error("invalid size unit {unit:?} in {input:?}")]
    Unit { input: String, unit: char },
}

/// Multiplier for a unit letter.
fn multiplier(unit: char) -> Option<f64> {
    match unit.to_ascii_uppercase() {
        'B' => Some(1.0),
        'K' => Some(1e3),
        'M' => Some(1e6),
        'G' => Some(1e9),
        'T' => Some(1e12),
        _ => None,
    }
}

/// Parse a size string such as `"10K"` or `"1.5g"` into bytes.
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let format_err = || SizeError::Format(input.to_string());

    let unit = input.chars().last().ok_or_else(format_err)?;
    if !unit.is_ascii_alphabetic() {
        return Err(format_err());
    }
    let magnitude = &input[..input.len() - 1];

    // Digits, optionally followed by a dot and at least one more digit.
    let (whole, fraction) = match magnitude.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (magnitude, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return Err(format_err());
    }

    let size: f64 = magnitude.parse().map_err(|_| format_err())?;
    let multiplier = multiplier(unit).ok_or_else(|| SizeError::Unit {
        input: input.to_string(),
        unit,
    })?;

    Ok((size * multiplier).round() as u64)
}

/// Format a byte count using the same decimal units the router uses.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [(&str, f64); 4] = [("T", 1e12), ("G", 1e9), ("M", 1e6), ("K", 1e3)];

    let value = bytes as f64;
    for (unit, factor) in UNITS {
        if value >= factor {
            return format!("{:.1}{}", value / factor, unit);
        }
    }
    format!("{}B", bytes)
}

/// Parse the leading integer of a string, ignoring whatever follows it.
///
/// The router reports memory figures as strings like `"1234 MB"`.
pub fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("10K"), Ok(10_000));
        assert_eq!(parse_size("1.5G"), Ok(1_500_000_000));
        assert_eq!(parse_size("512B"), Ok(512));
        assert_eq!(parse_size("2m"), Ok(2_000_000));
        assert_eq!(parse_size("3T"), Ok(3_000_000_000_000));
    }

    #[test]
    fn test_parse_size_unknown_unit() {
        assert_eq!(
            parse_size("5X"),
            Err(SizeError::Unit { input: "5X".to_string(), unit: 'X' })
        );
    }

    #[test]
    fn test_parse_size_bad_format() {
        for input in ["abc", "", "G", "1.G", ".5G", "10", "10 K", "-1K", "1.2.3K"] {
            assert_eq!(
                parse_size(input),
                Err(SizeError::Format(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(999), "999B");
        assert_eq!(format_size(10_000), "10.0K");
        assert_eq!(format_size(1_500_000_000), "1.5G");
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("1234 MB"), Some(1234));
        assert_eq!(leading_integer("42"), Some(42));
        assert_eq!(leading_integer("  7abc"), Some(7));
        assert_eq!(leading_integer("-3"), Some(-3));
        assert_eq!(leading_integer("MB"), None);
    }
}
