/// All monetary values are stored in cents (1 peso = 100 cents) to avoid
/// floating-point precision issues; formatting happens only at the edge.
///
/// Render a cents amount as a display price, e.g. 650_000_000 cents of
/// MXN becomes "$6,500,000.00 MXN".
pub fn format_price_cents(cents: i64, currency: &str) -> String {
    let units = cents / 100;
    let subunits = (cents % 100).abs();
    format!("${}.{:02} {}", group_thousands(units), subunits, currency)
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_parts() {
        assert_eq!(format_price_cents(250_000, "MXN"), "$2,500.00 MXN");
        assert_eq!(format_price_cents(250_075, "MXN"), "$2,500.75 MXN");
    }

    #[test]
    fn groups_large_amounts() {
        assert_eq!(format_price_cents(650_000_000, "MXN"), "$6,500,000.00 MXN");
        assert_eq!(format_price_cents(1_000_000_000, "MXN"), "$10,000,000.00 MXN");
    }

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_price_cents(99_999, "MXN"), "$999.99 MXN");
        assert_eq!(format_price_cents(0, "MXN"), "$0.00 MXN");
    }
}
