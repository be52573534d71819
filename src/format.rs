/// Currency formatting
///
/// The cart view never formats numbers itself. It goes through a
/// `PriceFormatter` so the locale and currency symbol stay in one place.

/// Formats a currency value for display
pub trait PriceFormatter {
    fn format(&self, value: f64) -> String;
}

/// Brazilian real, laid out like `R$ 1.234,56`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrlFormatter;

impl PriceFormatter for BrlFormatter {
    fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "R$\u{a0}NaN".to_string();
        }
        if value.is_infinite() {
            let sign = if value < 0.0 { "-" } else { "" };
            return format!("{sign}R$\u{a0}∞");
        }

        let cents = (value * 100.0).round() as i64;
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();

        let digits = (cents / 100).to_string();
        let mut integer = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                integer.push('.');
            }
            integer.push(ch);
        }

        format!("{sign}R$\u{a0}{integer},{:02}", cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_price(value: f64) -> String {
        BrlFormatter.format(value)
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_price(0.0), "R$\u{a0}0,00");
    }

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(format_price(179.9), "R$\u{a0}179,90");
        assert_eq!(format_price(2.005_1), "R$\u{a0}2,01");
        assert_eq!(format_price(0.994), "R$\u{a0}0,99");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_price(1234.5), "R$\u{a0}1.234,50");
        assert_eq!(format_price(1_000_000.0), "R$\u{a0}1.000.000,00");
        assert_eq!(format_price(999.99), "R$\u{a0}999,99");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_price(f64::NAN), "R$\u{a0}NaN");
        assert_eq!(format_price(f64::INFINITY), "R$\u{a0}∞");
        assert_eq!(format_price(f64::NEG_INFINITY), "-R$\u{a0}∞");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_price(-12.3), "-R$\u{a0}12,30");
    }
}
