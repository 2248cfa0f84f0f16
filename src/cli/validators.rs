//! CLI argument validators.

/// Parse and validate a sample rate (positive integer Hz).
pub fn parse_sample_rate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample rate"))?;

    if value == 0 {
        return Err("sample rate must be a positive integer".to_string());
    }

    Ok(value)
}

/// Parse and validate a fraction (0.0-1.0).
pub fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!("fraction must be between 0.0 and 1.0, got {value}"));
    }

    Ok(value)
}
