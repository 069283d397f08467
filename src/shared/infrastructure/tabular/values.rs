// Lenient cell parsing. Anything that is not a number becomes `None`.

pub fn safe_float(value: Option<&str>) -> Option<f64> {
    let parsed: f64 = value?.trim().parse().ok()?;
    if parsed.is_nan() { None } else { Some(parsed) }
}

/// Integers written as floats ("12.0", "12.7") are truncated toward zero.
pub fn safe_int(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }
    let parsed: f64 = value.parse().ok()?;
    if parsed.is_finite() && parsed.abs() < i64::MAX as f64 {
        Some(parsed.trunc() as i64)
    } else {
        None
    }
}
