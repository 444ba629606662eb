// GroupSwap — Amount Helpers
// to_base_units, base_units_to_amount

use crate::atoms::error::{EngineError, EngineResult};

/// Scale a human amount (e.g. 2.5) to integer base units given `decimals`,
/// flooring any digits beyond the asset's precision.
///
/// Works on the shortest decimal representation of the float, so `2.3` with
/// 2 decimals is exactly 230 rather than 229.
pub(crate) fn to_base_units(amount: f64, decimals: u8) -> EngineResult<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::Other(format!("Invalid amount: {}", amount)));
    }
    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| EngineError::Other(format!("Unsupported decimals: {}", decimals)))?;

    // f64 Display never uses exponent notation
    let text = amount.to_string();
    let (whole_str, frac_str) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text.as_str(), ""),
    };
    let whole: u64 = whole_str
        .parse()
        .map_err(|_| EngineError::Other(format!("Amount too large: {}", amount)))?;

    let kept = &frac_str[..frac_str.len().min(decimals as usize)];
    let frac = if kept.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", kept, width = decimals as usize);
        padded
            .parse::<u64>()
            .map_err(|e| EngineError::Other(format!("Invalid fractional: {}", e)))?
    };

    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| EngineError::Other(format!("Amount too large: {}", amount)))
}

/// Format base units as a trimmed decimal string ("1002000", 6 → "1.002").
pub(crate) fn base_units_to_amount(units: u64, decimals: u8) -> String {
    let places = decimals as usize;
    // Left-pad so there is always at least one whole digit
    let digits = format!("{:0>width$}", units, width = places + 1);
    let (whole, frac) = digits.split_at(digits.len() - places);
    match frac.trim_end_matches('0') {
        "" => whole.to_string(),
        frac => format!("{}.{}", whole, frac),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_scaling() {
        assert_eq!(to_base_units(2.5, 2).unwrap(), 250);
        assert_eq!(to_base_units(5.0, 2).unwrap(), 500);
    }

    #[test]
    fn test_native_scaling() {
        assert_eq!(to_base_units(1.0, 6).unwrap(), 1_000_000);
        assert_eq!(to_base_units(0.002, 6).unwrap(), 2_000);
    }

    #[test]
    fn test_excess_precision_is_floored() {
        assert_eq!(to_base_units(1.239, 2).unwrap(), 123);
        assert_eq!(to_base_units(0.1 + 0.2, 6).unwrap(), 300_000);
        assert_eq!(to_base_units(7.9, 0).unwrap(), 7);
    }

    #[test]
    fn test_no_binary_float_drift() {
        assert_eq!(to_base_units(2.3, 2).unwrap(), 230);
        assert_eq!(to_base_units(1.002, 6).unwrap(), 1_002_000);
    }

    #[test]
    fn test_tiny_amounts() {
        assert_eq!(to_base_units(0.0000001, 6).unwrap(), 0);
        assert_eq!(to_base_units(0.000001, 6).unwrap(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(to_base_units(-1.0, 6).is_err());
        assert!(to_base_units(f64::NAN, 6).is_err());
        assert!(to_base_units(f64::INFINITY, 6).is_err());
        assert!(to_base_units(1e30, 6).is_err());
        assert!(to_base_units(1.0, 20).is_err());
    }

    #[test]
    fn test_format_base_units() {
        assert_eq!(base_units_to_amount(1_002_000, 6), "1.002");
        assert_eq!(base_units_to_amount(1_000_000, 6), "1");
        assert_eq!(base_units_to_amount(250, 2), "2.5");
        assert_eq!(base_units_to_amount(5, 6), "0.000005");
        assert_eq!(base_units_to_amount(42, 0), "42");
        assert_eq!(base_units_to_amount(0, 2), "0");
        assert_eq!(base_units_to_amount(u64::MAX, 19), "1.8446744073709551615");
    }
}
