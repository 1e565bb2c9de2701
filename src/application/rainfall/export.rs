//! CSV rendering of rainfall entries

use crate::domain::RainfallEntry;

pub const CSV_HEADER: &str = "Year,Amount";

/// Render entries as CSV with a `Year,Amount` header, one CRLF-terminated
/// row per entry in the given order.
///
/// Amounts use Rust's `Debug` float format: a decimal point is kept
/// (`10.0`, not `10`) and magnitudes from `1e16` up switch to exponent
/// form without a sign (`1e16`, not `1e+16`).
pub fn to_csv(entries: &[RainfallEntry]) -> String {
    let mut out = String::with_capacity(16 + entries.len() * 16);
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");

    for entry in entries {
        out.push_str(&format!("{},{:?}\r\n", entry.year, entry.amount));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i32, year: i32, amount: f64) -> RainfallEntry {
        RainfallEntry { id, year, amount }
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(to_csv(&[]), "Year,Amount\r\n");
    }

    #[test]
    fn rows_follow_header_in_order() {
        let csv = to_csv(&[entry(1, 2020, 10.0), entry(2, 2019, 12.75)]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines, vec!["Year,Amount", "2020,10.0", "2019,12.75"]);
    }

    #[test]
    fn every_row_is_crlf_terminated() {
        let csv = to_csv(&[entry(1, 2021, 0.0)]);
        assert_eq!(csv, "Year,Amount\r\n2021,0.0\r\n");
    }

    #[test]
    fn amount_formatting_is_pinned() {
        let csv = to_csv(&[
            entry(1, 2020, 0.1),
            entry(2, 2021, 1e15),
            entry(3, 2022, 1e16),
        ]);
        let lines: Vec<&str> = csv.lines().skip(1).collect();

        assert_eq!(lines, vec!["2020,0.1", "2021,1000000000000000.0", "2022,1e16"]);
    }
}
