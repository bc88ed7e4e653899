const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Renders a byte count with binary units, e.g. `2048` as `2.00 KB`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{} {}", bytes, UNITS[0]),
        _ => format!("{:.2} {}", value, UNITS[unit]),
    }
}
