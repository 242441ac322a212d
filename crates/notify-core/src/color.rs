pub const MAX_COLOR: u32 = 0xFF_FFFF;

/// Parses an RGB override such as `00ff00` (a leading `#` is tolerated).
/// Returns `None` for anything that is not one to six hex digits.
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.is_empty() || digits.len() > 6 {
        return None;
    }
    if !digits.chars().all(|character| character.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(digits, 16)
        .ok()
        .filter(|color| *color <= MAX_COLOR)
}
