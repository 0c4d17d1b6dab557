//! Amount rendering for summaries.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Render `amount` with `symbol` and thousands separators.
///
/// Whole amounts have no fraction; anything else is rounded to two places.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();

    let whole = abs.trunc().normalize();
    let frac = abs - whole;
    let digits = whole.to_string();
    let grouped = group_thousands(&digits);

    if frac.is_zero() {
        format!("{sign}{symbol}{grouped}")
    } else {
        // frac is in [0.01, 0.99]
        let cents = (frac * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);
        format!("{sign}{symbol}{grouped}.{cents:02}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(format_amount(Decimal::from(129_999), "₹"), "₹129,999");
        assert_eq!(format_amount(Decimal::from(1_500_000), "₹"), "₹1,500,000");
        assert_eq!(format_amount(Decimal::from(999), "$"), "$999");
        assert_eq!(format_amount(Decimal::ZERO, "₹"), "₹0");
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(format_amount(Decimal::new(99_950, 2), "₹"), "₹999.50");
        assert_eq!(format_amount(Decimal::new(123_456_705, 2), "₹"), "₹1,234,567.05");
        assert_eq!(format_amount(Decimal::new(10_006, 3), "₹"), "₹10.01");
    }

    #[test]
    fn test_whole_after_rounding() {
        assert_eq!(format_amount(Decimal::new(1_000, 3), "₹"), "₹1");
        assert_eq!(format_amount(Decimal::from(150_000).round_dp(2), "₹"), "₹150,000");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_amount(Decimal::from(-2_500), "₹"), "-₹2,500");
        assert_eq!(format_amount(Decimal::new(-1, 3), "₹"), "₹0");
    }
}
