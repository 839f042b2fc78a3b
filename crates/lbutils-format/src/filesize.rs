const UNITS: [&str; 3] = ["B", "KB", "MB"];

/// Humanize a byte count into whole `B`, `KB` or `MB`, picking the largest
/// unit that gives a non-zero value. Anything below one byte reads `0 MB`.
pub fn format_filesize(bytes: i64) -> String {
    if bytes < 1 {
        return format!("0 {}", UNITS[2]);
    }
    let (value, unit) = UNITS
        .iter()
        .enumerate()
        .rev()
        .map(|(power, unit)| (bytes >> (10 * power), *unit))
        .find(|(value, _)| *value > 0)
        .unwrap_or((bytes, UNITS[0]));
    format!("{value} {unit}")
}

/// [`format_filesize`] for text input; anything that is not an integer is
/// returned as given.
pub fn format_filesize_str(bytes: &str) -> String {
    match bytes.trim().parse::<i64>() {
        Ok(n) => format_filesize(n),
        Err(_) => bytes.to_string(),
    }
}
