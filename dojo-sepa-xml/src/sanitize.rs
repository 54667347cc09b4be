//! Restriction of free text to the SEPA Latin character set.

/// Max length of names, address lines and remittance text.
pub const FREE_TEXT_LIMIT: usize = 70;
/// Max length of message, mandate and end-to-end identifiers.
pub const IDENTIFIER_LIMIT: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sanitized {
    pub text: String,
    pub removed: bool,
    pub truncated: bool,
}

fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'ä' => "ae",
        'ö' => "oe",
        'ü' => "ue",
        'Ä' => "Ae",
        'Ö' => "Oe",
        'Ü' => "Ue",
        'ß' => "ss",
        _ => return None,
    })
}

pub fn is_sepa_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || " /-?:().,'+".contains(c)
}

pub(crate) fn sanitize_to(input: &str, limit: usize) -> Sanitized {
    let mut removed = false;
    let mut text = String::with_capacity(input.len());
    for c in input.chars() {
        match transliterate(c) {
            Some(digraph) => text.push_str(digraph),
            None if is_sepa_char(c) => text.push(c),
            None => removed = true,
        }
    }
    // only ASCII is left, so bytes are chars
    let truncated = text.len() > limit;
    text.truncate(limit);
    Sanitized {
        text,
        removed,
        truncated,
    }
}

/// Transliterates umlauts and ß, drops everything outside the SEPA
/// character set and cuts the result to [`FREE_TEXT_LIMIT`] characters.
pub fn sanitize(input: &str) -> String {
    sanitize_to(input, FREE_TEXT_LIMIT).text
}

/// First `limit` characters of `input`.
pub(crate) fn take_chars(input: &str, limit: usize) -> &str {
    match input.char_indices().nth(limit) {
        Some((end, _)) => &input[..end],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umlauts_become_digraphs() {
        assert_eq!(sanitize("Müller Straße 5"), "Mueller Strasse 5");
        assert_eq!(sanitize("ä ö ü ß"), "ae oe ue ss");
        assert_eq!(sanitize("Ä Ö Ü"), "Ae Oe Ue");
        assert_eq!(sanitize("Jörg Kößler"), "Joerg Koessler");
    }

    #[test]
    fn disallowed_characters_are_dropped() {
        let s = sanitize_to("Beitrag #12 & Gebühr: 50€ (Q1)!", FREE_TEXT_LIMIT);
        assert_eq!(s.text, "Beitrag 12  Gebuehr: 50 (Q1)");
        assert!(s.removed);
        assert!(!s.truncated);
    }

    #[test]
    fn permitted_punctuation_survives() {
        let allowed = "A-z 0/9?:().,'+";
        let s = sanitize_to(allowed, FREE_TEXT_LIMIT);
        assert_eq!(s.text, allowed);
        assert!(!s.removed);
    }

    #[test]
    fn cut_after_transliteration() {
        let input = "ü".repeat(40);
        let s = sanitize_to(&input, FREE_TEXT_LIMIT);
        assert_eq!(s.text.len(), FREE_TEXT_LIMIT);
        assert_eq!(s.text, "ue".repeat(35));
        assert!(s.truncated);
        assert!(!s.removed);
    }

    #[test]
    fn take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("Größenwahn", 3), "Grö");
        assert_eq!(take_chars("abc", 20), "abc");
        assert_eq!(take_chars("", 20), "");
    }
}
