//! Recognition of color-formatting escape tokens.
//!
//! Tokens are copied through the translator untouched so that styling a
//! string never corrupts its formatting codes. Recognition is an ordered
//! list of explicit matchers; each inspects the start of the remaining
//! input and reports the byte length of the token it accepts. The first
//! matcher that accepts wins.

/// Characters that introduce a formatting escape sequence.
pub const MARKERS: [char; 2] = ['§', '&'];

/// A token matcher: byte length of the token at the start of `rest`, or
/// `None` when the input does not begin with that token.
pub(crate) type TokenMatcher = fn(&str) -> Option<usize>;

/// Matchers in priority order.
pub(crate) const TOKEN_MATCHERS: &[TokenMatcher] =
    &[legacy_color_code, rgb_code, marker_digit];

fn is_marker(ch: char) -> bool {
    MARKERS.contains(&ch)
}

/// Code characters valid after a marker in a legacy color code: the colors
/// `0-9`/`a-f`, the style codes `k-o`, and the reset `r`.
fn is_legacy_code(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Legacy two-character color code, e.g. `&a` or `§4`. Case-insensitive on
/// the code character.
pub(crate) fn legacy_color_code(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    let marker = chars.next().filter(|ch| is_marker(*ch))?;
    let code = chars.next().filter(|ch| is_legacy_code(*ch))?;
    Some(marker.len_utf8() + code.len_utf8())
}

/// RGB color code, either marker-prefixed (`&#1a2b3c`) or bracketed
/// (`<#1a2b3c>`).
pub(crate) fn rgb_code(rest: &str) -> Option<usize> {
    if let Some(tail) = rest.strip_prefix("&#") {
        if starts_with_hex_run(tail, 6) {
            return Some("&#".len() + 6);
        }
    }
    if let Some(tail) = rest.strip_prefix("<#") {
        if starts_with_hex_run(tail, 6) && tail.as_bytes().get(6) == Some(&b'>') {
            return Some("<#".len() + 6 + '>'.len_utf8());
        }
    }
    None
}

fn starts_with_hex_run(s: &str, len: usize) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= len && bytes[..len].iter().all(u8::is_ascii_hexdigit)
}

/// A marker followed by a decimal digit passes through as a two-character
/// unit even when the pair is not an otherwise valid token, so a partial
/// code is never half-substituted.
pub(crate) fn marker_digit(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    let marker = chars.next().filter(|ch| is_marker(*ch))?;
    let digit = chars.next().filter(char::is_ascii_digit)?;
    Some(marker.len_utf8() + digit.len_utf8())
}
