//! Helpers for tab-separated sequence and variant tables

/// Split a line into its tab-separated fields. A trailing `\n` or `\r\n` is dropped.
pub fn split_fields(line: &str) -> Vec<&str> {
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);
    line.split('\t').collect()
}

/// Prefix of `s` up to the first ASCII whitespace
pub fn first_token(s: &str) -> &str {
    match s.find(|c: char| c.is_ascii_whitespace()) {
        Some(end) => &s[..end],
        None => s,
    }
}
