//! Tolerant start-tag attribute reader.
//!
//! Works on a single tag slice (`<svg a="1" b='2'>`), complete or cut off.
//! Attributes whose quoted value never closes are not reported.

use std::ops::Range;

/// An attribute found inside a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Byte range of `value` within the tag (quotes excluded).
    pub value_range: Range<usize>,
    /// False for a bare name (`<rect hidden>`).
    pub has_value: bool,
}

/// Read all complete attributes of a start tag.
pub fn parse_attrs(tag: &str) -> Vec<Attr<'_>> {
    let bytes = tag.as_bytes();
    let mut attrs = Vec::new();

    // Skip `<` and the element name.
    let mut i = usize::from(bytes.first() == Some(&b'<'));
    while i < bytes.len() && !is_delim(bytes[i]) {
        i += 1;
    }

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' {
            break;
        }
        if bytes[i] == b'/' {
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len() && !is_delim(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        let name = &tag[name_start..i];
        if name.is_empty() {
            // Stray `=` or quote.
            i += 1;
            continue;
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            attrs.push(Attr {
                name,
                value: "",
                value_range: i..i,
                has_value: false,
            });
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let value_start = i + 1;
                let Some(len) = tag[value_start..].bytes().position(|b| b == quote) else {
                    break;
                };
                let value_end = value_start + len;
                attrs.push(Attr {
                    name,
                    value: &tag[value_start..value_end],
                    value_range: value_start..value_end,
                    has_value: true,
                });
                i = value_end + 1;
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && !is_delim(bytes[i]) {
                    i += 1;
                }
                attrs.push(Attr {
                    name,
                    value: &tag[value_start..i],
                    value_range: value_start..i,
                    has_value: i > value_start,
                });
            }
        }
    }

    attrs
}

/// Find an attribute by exact name.
pub fn find_attr<'a>(tag: &'a str, name: &str) -> Option<Attr<'a>> {
    parse_attrs(tag).into_iter().find(|attr| attr.name == name)
}

/// Parse the leading number of a length (`"24px"` -> 24, `"50%"` -> 50).
pub fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[inline]
fn is_delim(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attrs_quoted() {
        let tag = r#"<svg width="10" height='20' viewBox="0 0 10 20">"#;
        let attrs = parse_attrs(tag);
        let names: Vec<_> = attrs.iter().map(|a| a.name).collect();
        assert_eq!(names, ["width", "height", "viewBox"]);
        assert_eq!(attrs[1].value, "20");
        assert_eq!(&tag[attrs[2].value_range.clone()], "0 0 10 20");
    }

    #[test]
    fn test_parse_attrs_partial_tag() {
        let attrs = parse_attrs(r#"<svg viewBox="0 0 24 24" width="1"#);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, "viewBox");
    }

    #[test]
    fn test_parse_attrs_self_closing_and_bare() {
        let attrs = parse_attrs(r#"<rect hidden x = "1"/>"#);
        assert_eq!(attrs[0].name, "hidden");
        assert_eq!(attrs[0].value, "");
        assert!(!attrs[0].has_value);
        assert_eq!(attrs[1].name, "x");
        assert!(attrs[1].has_value);
        assert_eq!(attrs[1].value, "1");
    }

    #[test]
    fn test_find_attr() {
        let tag = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="x">"#;
        assert_eq!(
            find_attr(tag, "xmlns").map(|a| a.value),
            Some("http://www.w3.org/2000/svg")
        );
        assert!(find_attr(tag, "viewBox").is_none());
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("24"), Some(24.0));
        assert_eq!(leading_number("24.5px"), Some(24.5));
        assert_eq!(leading_number("100%"), Some(100.0));
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("auto"), None);
        assert_eq!(leading_number(""), None);
    }
}
