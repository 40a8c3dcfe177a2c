/// Size formatting utilities — human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// Unit suffixes, one per power of 1024.
pub const SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count into a compact human-readable string.
///
/// Binary magnitudes (1 KB = 1024 B), one decimal place, and a trailing
/// `.0` collapsed away: `512 -> "512B"`, `1536 -> "1.5KB"`, `2048 -> "2KB"`.
/// Zero is special-cased to `"0B"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    const K: u64 = 1024;
    // Integer log avoids float drift at exact powers of 1024.
    let i = (bytes.ilog(K) as usize).min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / (K as f64).powi(i as i32);
    let rounded = (value * 10.0).round() / 10.0;

    // `Display` for f64 already drops a zero fraction ("2", not "2.0").
    format!("{}{}", rounded, SIZE_UNITS[i])
}

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
