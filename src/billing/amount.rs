use crate::error::BillingError;

/// Parse a user-supplied hours or rate value.
///
/// Surrounding whitespace is ignored. Zero and negative values are accepted;
/// `NaN` and infinities are not, since they cannot produce a billable total.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64, BillingError> {
    let invalid = || BillingError::InvalidNumber {
        field,
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_integers_and_decimals() {
        assert_eq!(parse_amount("hours", "10").unwrap(), 10.0);
        assert_eq!(parse_amount("rate", "72.5").unwrap(), 72.5);
        assert_eq!(parse_amount("rate", " 3.25\n").unwrap(), 3.25);
    }

    #[test]
    fn test_accepts_zero_and_negative() {
        assert_eq!(parse_amount("hours", "0").unwrap(), 0.0);
        assert_eq!(parse_amount("hours", "-1.5").unwrap(), -1.5);
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = parse_amount("hours", "abc").unwrap_err();
        match err {
            BillingError::InvalidNumber { field, value } => {
                assert_eq!(field, "hours");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_amount("rate", "").is_err());
        assert!(parse_amount("rate", "12,50").is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(parse_amount("hours", "NaN").is_err());
        assert!(parse_amount("rate", "inf").is_err());
        assert!(parse_amount("rate", "1e400").is_err());
    }
}
