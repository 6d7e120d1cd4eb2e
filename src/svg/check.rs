//! Structural XML validity check.
//!
//! The sanitizer only needs a yes/no answer to "would a strict XML parser
//! accept this document as-is?". Keeping that behind [`XmlCheck`] lets the
//! parser be swapped (a browser target would ask its DOM parser instead).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::escape::{is_known_reference, is_valid_attr_value};

/// Answers whether a document is well-formed XML with a single root element.
pub trait XmlCheck {
    fn is_well_formed(&self, doc: &str) -> bool;
}

/// [`XmlCheck`] backed by `quick-xml`.
///
/// Rejects mismatched or missing end tags, malformed or duplicate
/// attributes, references to entities that need a DTD, and more than one
/// root. Non-whitespace text outside the root is rejected too.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXmlCheck;

impl XmlCheck for QuickXmlCheck {
    fn is_well_formed(&self, doc: &str) -> bool {
        let mut reader = Reader::from_str(doc);
        reader.config_mut().check_end_names = true;

        let mut depth = 0usize;
        let mut roots = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) => {
                    if !attributes_ok(&e) {
                        return false;
                    }
                    if depth == 0 {
                        roots += 1;
                    }
                    depth += 1;
                }
                Ok(Event::Empty(e)) => {
                    if !attributes_ok(&e) {
                        return false;
                    }
                    if depth == 0 {
                        roots += 1;
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                Ok(Event::Text(text)) => {
                    if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                        return false;
                    }
                }
                Ok(Event::GeneralRef(r)) => {
                    if depth == 0 || !is_known_reference(&r) {
                        return false;
                    }
                }
                Ok(Event::CData(_)) if depth == 0 => return false,
                Ok(_) => {}
                Err(_) => return false,
            }

            if roots > 1 {
                return false;
            }
        }

        depth == 0 && roots == 1
    }
}

/// Attribute syntax, plus no `<` or bare `&` inside values.
#[inline]
fn attributes_ok(start: &BytesStart<'_>) -> bool {
    start.attributes().all(|attr| {
        attr.is_ok_and(|attr| std::str::from_utf8(&attr.value).is_ok_and(is_valid_attr_value))
    })
}
