/// Read a whole number from a raw form field.
///
/// Leading/trailing whitespace and an optional `+` are ignored, then the
/// longest run of ASCII digits is taken, so `"12.7"` reads as 12 and
/// `"3台"` as 3. Returns `None` for blank input, a leading `-`, text with no
/// leading digits, or a value that overflows `u64`.
pub fn parse_whole(raw: &str) -> Option<u64> {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Parse a unit count, treating anything unreadable as zero.
pub fn parse_count_or_zero(raw: &str) -> u64 {
    parse_whole(raw).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_plain() {
        assert_eq!(parse_whole("500000"), Some(500_000));
        assert_eq!(parse_whole("0"), Some(0));
    }

    #[test]
    fn test_parse_whole_trims_whitespace() {
        assert_eq!(parse_whole("  42 \n"), Some(42));
    }

    #[test]
    fn test_parse_whole_plus_sign() {
        assert_eq!(parse_whole("+7"), Some(7));
    }

    #[test]
    fn test_parse_whole_takes_leading_digits() {
        assert_eq!(parse_whole("12.7"), Some(12));
        assert_eq!(parse_whole("3台"), Some(3));
    }

    #[test]
    fn test_parse_whole_rejects_blank_and_text() {
        assert_eq!(parse_whole(""), None);
        assert_eq!(parse_whole("   "), None);
        assert_eq!(parse_whole("abc"), None);
        assert_eq!(parse_whole("+"), None);
    }

    #[test]
    fn test_parse_whole_rejects_negative() {
        assert_eq!(parse_whole("-5"), None);
    }

    #[test]
    fn test_parse_whole_overflow() {
        assert_eq!(parse_whole("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_count_or_zero_defaults() {
        assert_eq!(parse_count_or_zero(""), 0);
        assert_eq!(parse_count_or_zero("x"), 0);
        assert_eq!(parse_count_or_zero("-3"), 0);
        assert_eq!(parse_count_or_zero("5"), 5);
    }
}
