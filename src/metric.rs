/// Reduce a raw metric cell to a comparable number.
///
/// Handles percentile text ("87%"), currency text ("€45.5m"), and thousands
/// separators ("1,234"). Returns `None` when nothing numeric remains (empty
/// cell, "—", unit-only text). Callers must treat `None` as "metric absent",
/// never as zero: zero is a valid percentile.
pub fn normalize_metric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let s = s.strip_suffix('%').unwrap_or(s);

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
