//! Currency display formatting

/// Format an amount in cents as a US-dollar display string.
///
/// `15795` becomes `"$157.95"`, `123456789` becomes `"$1,234,567.89"`.
pub fn format_currency(cents: i64) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let remainder = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{remainder:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_amounts() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(666), "$6.66");
        assert_eq!(format_currency(15795), "$157.95");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(100_000), "$1,000.00");
        assert_eq!(format_currency(123_456_789), "$1,234,567.89");
        assert_eq!(format_currency(99_999_999), "$999,999.99");
    }

    #[test]
    fn negative_amounts_keep_sign_outside_symbol() {
        assert_eq!(format_currency(-5), "-$0.05");
        assert_eq!(format_currency(-250_000), "-$2,500.00");
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(format_currency(i64::MIN), "-$92,233,720,368,547,758.08");
    }
}
