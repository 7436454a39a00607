//! Shared output formatting helpers.

/// Escapes a single CSV field.
///
/// Fields containing commas, quotes or newlines are wrapped in quotes with
/// embedded quotes doubled; everything else passes through unchanged.
#[must_use]
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Formats a byte count for table output.
///
/// Sizes below one KiB print as plain bytes; larger sizes print with one
/// decimal place and a binary unit suffix.
#[must_use]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}
