//! Formatting utility functions.
//!
//! Provides human-readable formatting for sizes, digests and entropy values.

/// Format byte count as human-readable string.
///
/// # Examples
/// ```
/// use binscope::util::format::format_bytes;
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format an integer with comma thousands separators.
///
/// # Examples
/// ```
/// use binscope::util::format::format_thousands;
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// ```
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }

    output
}

/// Placeholder shown when there is no entropy to report.
pub const NO_DATA: &str = "N/A";

/// Format an optional entropy value with four decimals, or [`NO_DATA`].
pub fn format_entropy(entropy: Option<f64>) -> String {
    entropy.map_or_else(|| NO_DATA.to_string(), |value| format!("{value:.4}"))
}

/// Lowercase hex encoding of a byte slice.
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(output, "{byte:02x}");
    }
    output
}
