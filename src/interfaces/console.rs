//! Console input parsing and report rendering for the CLI surfaces.

use crate::domain::vehicle::ValuationPoint;

/// Parse a user-entered amount that may carry digit grouping
/// ("150.000.000", "60,000"). Returns None for anything non-numeric so the
/// caller can fall back to a derived default.
pub fn parse_grouped_integer(input: &str) -> Option<i64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Indonesian rupiah formatting with dot grouping: "Rp 150.000.000".
pub fn format_rupiah(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// The 20-row projection table.
pub fn render_projection_table(points: &[ValuationPoint]) -> String {
    let mut out = String::new();
    out.push_str("══════════════════════════════════════════\n");
    out.push_str("  Year   Age   Estimated Value\n");
    out.push_str("══════════════════════════════════════════\n");

    for point in points {
        out.push_str(&format!(
            "  {:<6} {:>3}   {}\n",
            point.year,
            point.vehicle_age,
            format_rupiah(point.value as i64)
        ));
    }

    out.push_str("══════════════════════════════════════════\n");
    out
}

/// The projected curve as horizontal bars, one per simulated year.
pub fn render_value_curve(points: &[ValuationPoint]) -> String {
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let mut out = String::new();

    if !max.is_finite() || max <= 0.0 {
        return out;
    }

    for point in points {
        let bar_len = (point.value.max(0.0) / max * 40.0).ceil() as usize;
        let bar: String = "█".repeat(bar_len);
        out.push_str(&format!(
            "  {} {:>16} {}\n",
            point.year,
            format_rupiah(point.value as i64),
            bar
        ));
    }

    out
}
