//! Units formatting and conversion utilities
//!
//! Provides parsing of size strings with K/M/G suffixes, human-readable
//! formatting of byte counts, and throughput calculation.

use std::time::Duration;

/// Parse a size string with an optional K/M/G suffix (binary multipliers)
/// into bytes.
///
/// # Examples
/// ```
/// use disksweep::util::units::parse_size;
///
/// assert_eq!(parse_size("512").unwrap(), 512);
/// assert_eq!(parse_size("4K").unwrap(), 4096);
/// assert_eq!(parse_size("1M").unwrap(), 1048576);
/// assert_eq!(parse_size("2G").unwrap(), 2147483648);
/// ```
pub fn parse_size(input: &str) -> Result<u64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty size string".to_string());
    }

    let (number_part, multiplier) = match input.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            let number_part = &input[..input.len() - 1];
            let multiplier = match c.to_ascii_uppercase() {
                'K' => 1024u64,
                'M' => 1024u64 * 1024,
                'G' => 1024u64 * 1024 * 1024,
                _ => return Err(format!("unknown size suffix: {}", c)),
            };
            (number_part, multiplier)
        }
        _ => (input, 1u64),
    };

    let number: u64 = number_part
        .parse()
        .map_err(|_| format!("invalid number: {}", number_part))?;

    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size out of range: {}", input))
}

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use disksweep::util::units::format_bytes;
///
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(1048576), "1.0 MiB");
/// assert_eq!(format_bytes(1073741824), "1.0 GiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Calculate throughput in MB/s from a byte count and an elapsed duration.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use disksweep::util::units::throughput_mbs;
///
/// let speed = throughput_mbs(1048576, Duration::from_secs(1));
/// assert!((speed - 1.0).abs() < 0.01);
/// ```
pub fn throughput_mbs(bytes: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }

    let megabytes = bytes as f64 / 1_048_576.0; // 1 MiB = 1,048,576 bytes
    megabytes / elapsed.as_secs_f64()
}
