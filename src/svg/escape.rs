//! Character references and escaping for repaired markup.
//!
//! Streamed text often carries `&` and `<` literally (`AT&T`, `1 < 2`).
//! Only the five predefined entities and numeric references survive a strict
//! XML parser, so anything else is escaped.

use std::borrow::Cow;

/// Entities every XML parser knows without a DTD.
const PREDEFINED: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Length of the well-formed reference at the start of `s` (`&amp;`, `&#38;`, `&#x26;`).
pub fn reference_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];

    let valid = if let Some(hex) = name.strip_prefix("#x") {
        !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit())
    } else if let Some(dec) = name.strip_prefix('#') {
        !dec.is_empty() && dec.bytes().all(|b| b.is_ascii_digit())
    } else {
        PREDEFINED.contains(&name)
    };

    valid.then_some(end + 2)
}

/// True when `name` is a known entity or a numeric reference (without `&` and `;`).
pub fn is_known_reference(name: &[u8]) -> bool {
    std::str::from_utf8(name).is_ok_and(|name| reference_len(&format!("&{name};")).is_some())
}

/// Escape text content: every `&` not starting a valid reference becomes `&amp;`.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape_with(text, false)
}

/// Escape a value for a double-quoted attribute.
pub fn escape_attr_value(value: &str) -> Cow<'_, str> {
    escape_with(value, true)
}

/// True when a raw attribute value is legal XML as written (no `<`, no bare `&`).
pub fn is_valid_attr_value(value: &str) -> bool {
    !value.contains('<') && matches!(escape_text(value), Cow::Borrowed(_))
}

fn escape_with(s: &str, attr: bool) -> Cow<'_, str> {
    let needs_escape = |i: usize, c: char| match c {
        '&' => reference_len(&s[i..]).is_none(),
        '<' => attr,
        '"' => attr,
        _ => false,
    };

    if !s.char_indices().any(|(i, c)| needs_escape(i, c)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        match c {
            '&' if needs_escape(i, c) => out.push_str("&amp;"),
            '<' if attr => out.push_str("&lt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// XML name check (ASCII subset plus any non-ASCII letter).
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_len() {
        assert_eq!(reference_len("&amp; rest"), Some(5));
        assert_eq!(reference_len("&#38;"), Some(5));
        assert_eq!(reference_len("&#x26;"), Some(6));
        assert_eq!(reference_len("&T 1 &lt;"), None);
        assert_eq!(reference_len("&nbsp;"), None);
        assert_eq!(reference_len("&#x;"), None);
        assert_eq!(reference_len("&amp"), None);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("AT&T"), "AT&amp;T");
        assert_eq!(escape_text("a &amp; b &lt; c"), "a &amp; b &lt; c");
        assert_eq!(escape_text("&nbsp;"), "&amp;nbsp;");
        assert!(matches!(escape_text("plain < text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attr_value() {
        assert_eq!(escape_attr_value(r#"a<b "c" &d"#), "a&lt;b &quot;c&quot; &amp;d");
        assert!(is_valid_attr_value("0 0 10 10"));
        assert!(is_valid_attr_value("say \"hi\" &amp; go"));
        assert!(!is_valid_attr_value("x?a=1&b=2"));
        assert!(!is_valid_attr_value("1<2"));
    }

    #[test]
    fn test_is_known_reference() {
        assert!(is_known_reference(b"amp"));
        assert!(is_known_reference(b"#160"));
        assert!(!is_known_reference(b"nbsp"));
        assert!(!is_known_reference(b" b"));
    }

    #[test]
    fn test_is_xml_name() {
        assert!(is_xml_name("svg:path"));
        assert!(is_xml_name("stroke-width"));
        assert!(!is_xml_name("junk\""));
        assert!(!is_xml_name("1x"));
        assert!(!is_xml_name(""));
    }
}
