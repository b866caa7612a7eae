//! The transform engine: a single pass over the input that preserves
//! formatting escape tokens and substitutes everything else through the
//! glyph tables.

use crate::codes::TOKEN_MATCHERS;
use crate::glyphs::substitute;

/// Translate `input` into its stylized form.
///
/// The whole input is lowercased first; small-caps glyphs have no uppercase
/// counterparts, so the output carries no case. Color codes (legacy
/// two-character codes and both RGB forms) are emitted verbatim, mapped
/// characters are replaced by their glyph, and everything else passes
/// through unchanged.
///
/// The function is total and deterministic: it never fails, and every
/// character of the input contributes to the output.
pub fn translate(input: &str) -> String {
    let normalized = input.to_lowercase();
    let mut output = String::with_capacity(normalized.len());
    let mut rest = normalized.as_str();

    'scan: while let Some(ch) = rest.chars().next() {
        for matcher in TOKEN_MATCHERS {
            if let Some(len) = matcher(rest) {
                output.push_str(&rest[..len]);
                rest = &rest[len..];
                continue 'scan;
            }
        }
        output.push(substitute(ch).unwrap_or(ch));
        rest = &rest[ch.len_utf8()..];
    }
    output
}
