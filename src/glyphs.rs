//! Substitution tables for the stylized glyph alphabet.
//!
//! Three character classes are mapped: Cyrillic letters, Latin letters and
//! ASCII digits. Each class is a stack of layers where a later layer
//! overrides an earlier one, and the classes are consulted in a fixed
//! order: Cyrillic first, then Latin, then digits. The tables are immutable
//! and fixed at build time.

use phf::phf_map;

/// Cyrillic letters to their small-caps lookalikes. Letters without a
/// convincing lookalike map to themselves.
static CYRILLIC: phf::Map<char, char> = phf_map! {
    'а' => 'ᴀ',
    'б' => 'б',
    'в' => 'ʙ',
    'г' => 'г',
    'д' => 'д',
    'е' => 'ᴇ',
    'ж' => 'ж',
    'з' => 'з',
    'и' => 'и',
    'й' => 'й',
    'к' => 'ᴋ',
    'л' => 'л',
    'м' => 'м',
    'н' => 'ʜ',
    'о' => 'ᴏ',
    'п' => 'п',
    'р' => 'ᴘ',
    'с' => 'ᴄ',
    'т' => 'т',
    'у' => 'ʏ',
    'ф' => 'ȹ',
    'х' => 'x',
    'ц' => 'ц',
    'ч' => 'ч',
    'ш' => 'ш',
    'щ' => 'щ',
    'ъ' => 'ъ',
    'ы' => 'ы',
    'ь' => 'ь',
    'э' => 'э',
    'ю' => 'ю',
    'я' => 'я',
};

/// Additions on top of [`CYRILLIC`].
static CYRILLIC_EXTRAS: phf::Map<char, char> = phf_map! {
    'ё' => 'ᴇ',
};

/// Latin letters to their small-caps lookalikes; `s` and `x` have no
/// distinct glyph and map to themselves.
static LATIN: phf::Map<char, char> = phf_map! {
    'a' => 'ᴀ',
    'b' => 'ʙ',
    'c' => 'ᴄ',
    'd' => 'ᴅ',
    'e' => 'ᴇ',
    'f' => 'ғ',
    'g' => 'ɢ',
    'h' => 'ʜ',
    'i' => 'ɪ',
    'j' => 'ᴊ',
    'k' => 'ᴋ',
    'l' => 'ʟ',
    'm' => 'ᴍ',
    'n' => 'ɴ',
    'o' => 'ᴏ',
    'p' => 'ᴘ',
    'q' => 'ǫ',
    'r' => 'ʀ',
    's' => 's',
    't' => 'ᴛ',
    'u' => 'ᴜ',
    'v' => 'ᴠ',
    'w' => 'ᴡ',
    'x' => 'x',
    'y' => 'ʏ',
    'z' => 'ᴢ',
};

/// Additions on top of [`LATIN`]: accented vowels fold into the base glyph,
/// and `ꜰ` replaces the earlier `ғ` (the later layer wins).
static LATIN_EXTRAS: phf::Map<char, char> = phf_map! {
    'ñ' => 'ɴ',
    'é' => 'ᴇ',
    'è' => 'ᴇ',
    'ê' => 'ᴇ',
    'f' => 'ꜰ',
};

/// ASCII digits to subscript glyphs.
static DIGITS: phf::Map<char, char> = phf_map! {
    '0' => '₀',
    '1' => '₁',
    '2' => '₂',
    '3' => '₃',
    '4' => '₄',
    '5' => '₅',
    '6' => '₆',
    '7' => '₇',
    '8' => '₈',
    '9' => '₉',
};

/// A character class made of override layers. Lookup walks the layers from
/// the last to the first, so a later layer wins when both define a key.
struct Alphabet {
    layers: &'static [&'static phf::Map<char, char>],
}

impl Alphabet {
    fn glyph(&self, ch: char) -> Option<char> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(&ch).copied())
    }
}

static ALPHABETS: [Alphabet; 3] = [
    Alphabet {
        layers: &[&CYRILLIC, &CYRILLIC_EXTRAS],
    },
    Alphabet {
        layers: &[&LATIN, &LATIN_EXTRAS],
    },
    Alphabet {
        layers: &[&DIGITS],
    },
];

/// Resolve the stylized glyph for a single lowercase character.
///
/// Returns `None` for characters outside every table; the translator
/// passes those through unchanged.
pub fn substitute(ch: char) -> Option<char> {
    ALPHABETS.iter().find_map(|alphabet| alphabet.glyph(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_small_caps() {
        assert_eq!(substitute('a'), Some('ᴀ'));
        assert_eq!(substitute('e'), Some('ᴇ'));
        assert_eq!(substitute('z'), Some('ᴢ'));
    }

    #[test]
    fn test_latin_self_mappings() {
        // `s` and `x` are mapped, but to themselves.
        assert_eq!(substitute('s'), Some('s'));
        assert_eq!(substitute('x'), Some('x'));
    }

    #[test]
    fn test_latin_extras_override_base() {
        // The base table maps `f` to `ғ`; the extras layer wins.
        assert_eq!(substitute('f'), Some('ꜰ'));
        assert_eq!(substitute('é'), Some('ᴇ'));
        assert_eq!(substitute('ñ'), Some('ɴ'));
    }

    #[test]
    fn test_cyrillic_glyphs() {
        assert_eq!(substitute('а'), Some('ᴀ'));
        assert_eq!(substitute('ф'), Some('ȹ'));
        assert_eq!(substitute('х'), Some('x'));
        // Identity mapping for letters without a lookalike.
        assert_eq!(substitute('б'), Some('б'));
        assert_eq!(substitute('ё'), Some('ᴇ'));
    }

    #[test]
    fn test_digit_subscripts() {
        assert_eq!(substitute('0'), Some('₀'));
        assert_eq!(substitute('9'), Some('₉'));
    }

    #[test]
    fn test_unmapped_characters() {
        assert_eq!(substitute(' '), None);
        assert_eq!(substitute('!'), None);
        assert_eq!(substitute('&'), None);
        assert_eq!(substitute('ω'), None);
    }
}
