// Mon Aug 03 2026 - Alex

/// Encodes a key as UTF-16 for the wide-character export contract.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Same, with the terminating NUL the callee scans for.
pub fn to_wide_null(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decodes a wide string up to the first NUL (or the end of the slice).
pub fn from_wide(wide: &[u16]) -> String {
    let end = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..end])
}

/// Pads or truncates to a display width; truncation appends an ellipsis.
pub fn fixed_length(input: &str, length: usize) -> String {
    let count = input.chars().count();
    if count == length {
        return input.to_string();
    }
    if count < length {
        let mut padded = input.to_string();
        padded.extend(std::iter::repeat(' ').take(length - count));
        return padded;
    }
    let mut truncated: String = input.chars().take(length).collect();
    truncated.push('\u{2026}');
    truncated
}
