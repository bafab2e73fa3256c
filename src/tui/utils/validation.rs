//! Validation helpers for the account forms

/// Parse a balance typed by the user. Accepts a decimal comma and spaces
/// between digit groups; the value must be a finite number >= 0.
pub fn validate_amount(amount: &str) -> Result<f64, String> {
    let normalized: String = amount
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err("Le solde est requis".to_string());
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err("Le solde doit etre positif".to_string()),
        Err(_) => Err("Format de montant invalide".to_string()),
    }
}

/// Whether `c` may be typed into an amount field
pub fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("100.5"), Ok(100.5));
        assert_eq!(validate_amount("1 234,56"), Ok(1234.56));
        assert_eq!(validate_amount("0"), Ok(0.0));
        assert!(validate_amount("-10").is_err());
        assert!(validate_amount("abc").is_err());
        assert!(validate_amount("   ").is_err());
        assert!(validate_amount("inf").is_err());
    }

    #[test]
    fn test_is_amount_char() {
        assert!(is_amount_char('7'));
        assert!(is_amount_char(','));
        assert!(!is_amount_char('e'));
        assert!(!is_amount_char('-'));
    }
}
