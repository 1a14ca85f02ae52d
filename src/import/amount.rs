use rust_decimal::Decimal;

use super::RowError;

/// Parses amounts as they appear in bank exports, e.g. `-12.50`, `- $10.00` or `"+ $1,234.56"`.
pub fn parse_amount(content: &str) -> Result<Decimal, RowError> {
    let mut normalized: String = content
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();
    if normalized.starts_with('+') {
        normalized.remove(0);
    }
    if normalized.is_empty() {
        return Err(RowError::Amount(content.to_string()));
    }
    Decimal::from_str_exact(&normalized).map_err(|_| RowError::Amount(content.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("123.45", Decimal::new(12345, 2))]
    #[case("-123.45", Decimal::new(-12345, 2))]
    #[case(" -5.00 ", Decimal::new(-500, 2))]
    #[case("0.00", Decimal::new(0, 2))]
    #[case("42", Decimal::new(42, 0))]
    #[case("- $10.00", Decimal::new(-1000, 2))]
    #[case("+ $25.50", Decimal::new(2550, 2))]
    #[case("$1,234.56", Decimal::new(123456, 2))]
    #[case("- $1,234.56", Decimal::new(-123456, 2))]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(Ok(expected), parse_amount(input));
    }

    #[rstest]
    #[case("")]
    #[case("$")]
    #[case("Amount")]
    #[case("Amount (total)")]
    #[case("123.4.5")]
    #[case("12a")]
    fn invalid_amount(#[case] input: &str) {
        assert_eq!(Err(RowError::Amount(input.to_string())), parse_amount(input));
    }
}
