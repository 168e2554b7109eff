/// Render a raw amount as the currency string shown on screen
///
/// The backend stores plain numbers; everything the user sees goes through
/// here. Formatting follows the pt-BR locale: "R$" prefix, '.' as the
/// thousands separator, ',' before the two decimal places.
pub fn format_value(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();

    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_value(0.0), "R$ 0,00");
    }

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_value(25.0), "R$ 25,00");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_value(12.5), "R$ 12,50");
        assert_eq!(format_value(9.99), "R$ 9,99");
    }

    #[test]
    fn test_format_thousands_grouping() {
        assert_eq!(format_value(1234.56), "R$ 1.234,56");
        assert_eq!(format_value(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_rounds_to_nearest_cent() {
        assert_eq!(format_value(10.004), "R$ 10,00");
        assert_eq!(format_value(10.006), "R$ 10,01");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_value(-12.5), "-R$ 12,50");
    }
}
