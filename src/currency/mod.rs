//! Parsing and formatting of Brazilian-real amounts.
//!
//! Cells store text like `"R$ 1.234,56"` (dot grouping, comma decimals).
//! Chat messages use the same convention, minus the symbol.

/// Currency prefix written into every monetary cell.
pub const SYMBOL: &str = "R$";

/// Parses spreadsheet cell text into a numeric value.
///
/// Blank or malformed cells count as zero so historical garbage never breaks
/// an aggregate.
pub fn parse_cell(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    normalize_amount(&cleaned).unwrap_or(0.0)
}

/// Normalizes a decimal run written with either separator convention.
///
/// The comma becomes the decimal point; when more than one dot remains, all
/// but the last are grouping separators ("1.234,56" -> 1234.56).
pub fn normalize_amount(run: &str) -> Option<f64> {
    let mut normalized = run.replace(',', ".");
    if let Some(last_dot) = normalized.rfind('.') {
        let (head, tail) = normalized.split_at(last_dot);
        let head: String = head.chars().filter(|c| *c != '.').collect();
        normalized = format!("{head}{tail}");
    }
    let value: f64 = normalized.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Formats a value the way the sheet stores it: `"R$ 1.234,56"`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let body = format!("{} {},{:02}", SYMBOL, group_thousands(cents / 100), cents % 100);
    if value < -0.004 {
        format!("-{body}")
    } else {
        body
    }
}

fn group_thousands(value: u64) -> String {
    let mut grouped = String::new();
    for (i, digit) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            grouped.insert(0, '.');
        }
        grouped.insert(0, digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_comma_and_dot_decimals() {
        assert_eq!(normalize_amount("87,10"), Some(87.10));
        assert_eq!(normalize_amount("87.10"), Some(87.10));
        assert_eq!(normalize_amount("1.234,56"), Some(1234.56));
        assert_eq!(normalize_amount("1.234.567,89"), Some(1234567.89));
        assert_eq!(normalize_amount("517"), Some(517.0));
        assert_eq!(normalize_amount("abc"), None);
    }

    #[test]
    fn parses_cell_text() {
        assert_eq!(parse_cell("R$ 1.234,56"), 1234.56);
        assert_eq!(parse_cell("R$ 0,00"), 0.0);
        assert_eq!(parse_cell("-R$ 12,50"), -12.5);
        assert_eq!(parse_cell(""), 0.0);
        assert_eq!(parse_cell("  "), 0.0);
        assert_eq!(parse_cell("sem valor"), 0.0);
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(87.1), "R$ 87,10");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(-52.3), "-R$ 52,30");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn round_trips_through_cell_text() {
        for value in [87.10, 1234.56, 0.01, 999.99, 10_000.0] {
            let stored = format_brl(value);
            assert!((parse_cell(&stored) - value).abs() < 0.005, "{stored}");
        }
    }
}
