/// Format a byte count as a human-readable size: base 1024, rounded to two
/// decimal places with trailing zeros dropped (`1536` becomes `1.5 KB`).
pub fn human_size(bytes: u64) -> String {
    const PREFIXES: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

    let mut size = bytes as f64;
    let mut pos = 0;
    while size > 1024.0 && pos + 1 < PREFIXES.len() {
        size /= 1024.0;
        pos += 1;
    }
    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, PREFIXES[pos])
}
