// Output line normalization

/// Decode one raw line of child output for the log
///
/// Drops trailing whitespace (including `\r\n`). Leading and interior
/// whitespace is kept. Invalid UTF-8 becomes U+FFFD.
pub fn normalize_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim_end().to_string()
}
