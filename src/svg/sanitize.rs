//! Live-preview repair of a partially received SVG document.
//!
//! [`sanitize_stream`] is called with the whole buffer received so far and
//! returns a snapshot that can be rendered right away. Nothing is carried
//! between calls; every call rescans the buffer.
//!
//! # Repair
//!
//! ```text
//! buffer ──► well-formed? ──yes──► returned trimmed
//!               │no
//!               ▼
//!         locate root `<svg`  ──none──► ""
//!               │
//!               ▼
//!         root tag complete? ──no──► synthesized empty root
//!               │yes
//!               ▼
//!         scan children (tag stack, truncate at cut, escape text)
//!               │
//!               ▼
//!         normalized root + children + synthetic closes
//! ```

use std::borrow::Cow;

use quick_xml::events::BytesStart;

use super::SVG_NAMESPACE;
use super::attr::{find_attr, leading_number, parse_attrs};
use super::check::{QuickXmlCheck, XmlCheck};
use super::escape::{escape_attr_value, escape_text, is_valid_attr_value, is_xml_name};
use super::viewbox::{DEFAULT_VIEWBOX, ViewBox, normalize_viewbox};

/// Repair a streaming buffer with the default options and checker.
///
/// Returns an empty string while there is nothing to show yet.
pub fn sanitize_stream(buffer: &str) -> String {
    StreamSanitizer::<QuickXmlCheck>::default().sanitize(buffer)
}

/// Options for [`StreamSanitizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SanitizeOptions {
    /// viewBox used when none can be recovered from the document.
    pub default_viewbox: ViewBox,
    /// Run the structural check first and return valid buffers untouched.
    pub check: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            default_viewbox: DEFAULT_VIEWBOX,
            check: true,
        }
    }
}

/// Turns partial SVG buffers into renderable snapshots.
#[derive(Debug, Clone, Default)]
pub struct StreamSanitizer<C = QuickXmlCheck> {
    checker: C,
    options: SanitizeOptions,
}

impl StreamSanitizer {
    pub fn new(options: SanitizeOptions) -> Self {
        Self {
            checker: QuickXmlCheck,
            options,
        }
    }
}

impl<C: XmlCheck> StreamSanitizer<C> {
    /// Use a different structural checker.
    pub fn with_checker(checker: C, options: SanitizeOptions) -> Self {
        Self { checker, options }
    }

    pub fn options(&self) -> &SanitizeOptions {
        &self.options
    }

    /// Produce a snapshot of `buffer`.
    pub fn sanitize(&self, buffer: &str) -> String {
        if buffer.is_empty() {
            return String::new();
        }

        let trimmed = buffer.trim();
        if self.options.check
            && trimmed.starts_with("<svg")
            && trimmed.ends_with("</svg>")
            && self.checker.is_well_formed(trimmed)
        {
            return trimmed.to_string();
        }

        let Some(root_start) = find_root(buffer) else {
            return String::new();
        };
        let doc = &buffer[root_start..];

        let Some(root_end) = tag_end(doc, 0) else {
            return self.synthesized_root(doc);
        };
        let self_closing = is_self_closing(&doc[..=root_end]);
        let Some(root_tag) = repair_start_tag(&doc[..=root_end], self_closing) else {
            return self.synthesized_root(doc);
        };

        let mut out = String::with_capacity(doc.len() + 96);
        out.push_str(&self.normalize_root(&root_tag, self_closing));

        let mut stack = vec!["svg".to_string()];
        if !self_closing {
            scan_children(&doc[root_end + 1..], &mut stack, &mut out);
        }

        for name in stack.iter().rev() {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }

        out
    }

    /// Empty root for a document whose opening tag is still arriving.
    ///
    /// Keeps the viewBox if its value already arrived in full.
    fn synthesized_root(&self, partial: &str) -> String {
        let viewbox = find_attr(partial, "viewBox")
            .map(|attr| normalize_viewbox(attr.value))
            .unwrap_or_else(|| self.options.default_viewbox.to_string());
        format!(r#"<svg viewBox="{viewbox}" xmlns="{SVG_NAMESPACE}"></svg>"#)
    }

    /// Rewrite the root start tag: normalized viewBox, namespace, never self-closing.
    fn normalize_root(&self, tag: &str, self_closing: bool) -> String {
        let mut head = tag[..tag.len() - 1].trim_end();
        if self_closing {
            head = head[..head.len() - 1].trim_end();
        }
        let mut head = head.to_string();

        let viewbox = find_attr(&head, "viewBox")
            .map(|attr| (attr.value_range.clone(), normalize_viewbox(attr.value)));
        match viewbox {
            Some((range, normalized)) => head.replace_range(range, &normalized),
            None => {
                let viewbox = self.viewbox_from_size(&head);
                head.push_str(&format!(r#" viewBox="{viewbox}""#));
            }
        }

        if find_attr(&head, "xmlns").is_none() {
            head.push_str(&format!(r#" xmlns="{SVG_NAMESPACE}""#));
        }

        head.push('>');
        head
    }

    fn viewbox_from_size(&self, tag: &str) -> ViewBox {
        let size = |name| {
            find_attr(tag, name)
                .and_then(|attr| leading_number(attr.value))
                .filter(|v| *v > 0.0)
        };
        match (size("width"), size("height")) {
            (Some(width), Some(height)) => ViewBox::new(0.0, 0.0, width, height),
            _ => self.options.default_viewbox,
        }
    }
}

/// Byte offset of the first `<svg` that starts an element.
///
/// A trailing `<svg` with nothing after it counts: the tag is still arriving.
fn find_root(buffer: &str) -> Option<usize> {
    buffer.match_indices("<svg").map(|(i, _)| i).find(|&i| {
        match buffer.as_bytes().get(i + 4) {
            None => true,
            Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
        }
    })
}

/// Index of the `>` closing the tag that starts at `start`, quotes respected.
fn tag_end(s: &str, start: usize) -> Option<usize> {
    let mut quote = None;
    for (offset, b) in s.as_bytes()[start + 1..].iter().enumerate() {
        match (quote, *b) {
            (None, b'"' | b'\'') => quote = Some(*b),
            (Some(q), b) if b == q => quote = None,
            (None, b'>') => return Some(start + 1 + offset),
            _ => {}
        }
    }
    None
}

#[inline]
fn is_self_closing(tag: &str) -> bool {
    tag[..tag.len() - 1].trim_end().ends_with('/')
}

/// Element name at the start of `s` (after `<` or `</`).
#[inline]
fn tag_name(s: &str) -> &str {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(s.len());
    &s[..end]
}

#[inline]
fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

/// Start tag a strict parser accepts, or `None` when the element name is invalid.
///
/// Legal tags are kept as written. Anything else is rebuilt from its
/// readable attributes: values double-quoted and escaped, invalid names,
/// bare names and repeats dropped.
fn repair_start_tag(tag: &str, self_closing: bool) -> Option<Cow<'_, str>> {
    let name = tag_name(&tag[1..]);
    if !is_xml_name(name) {
        return None;
    }
    if is_legal_start_tag(tag, name.len(), self_closing) {
        return Some(Cow::Borrowed(tag));
    }

    let mut out = String::with_capacity(tag.len() + 16);
    out.push('<');
    out.push_str(name);

    let mut seen: Vec<&str> = Vec::new();
    for attr in parse_attrs(tag) {
        if !attr.has_value || !is_xml_name(attr.name) || seen.contains(&attr.name) {
            continue;
        }
        seen.push(attr.name);
        out.push(' ');
        out.push_str(attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attr_value(attr.value));
        out.push('"');
    }

    out.push_str(if self_closing { "/>" } else { ">" });
    Some(Cow::Owned(out))
}

/// Attribute syntax per quick-xml plus legal names and values.
fn is_legal_start_tag(tag: &str, name_len: usize, self_closing: bool) -> bool {
    let inner = tag[1..tag.len() - 1].trim_end();
    let inner = if self_closing {
        inner.strip_suffix('/').unwrap_or(inner)
    } else {
        inner
    };

    BytesStart::from_content(inner, name_len)
        .attributes()
        .all(|attr| {
            attr.is_ok_and(|attr| {
                std::str::from_utf8(attr.key.as_ref()).is_ok_and(is_xml_name)
                    && std::str::from_utf8(&attr.value).is_ok_and(is_valid_attr_value)
            })
        })
}

/// Copy complete markup from `body` into `out`, tracking open elements.
///
/// Stops at the first construct that is cut off by the end of the buffer,
/// or once the root element closes.
fn scan_children(body: &str, stack: &mut Vec<String>, out: &mut String) {
    let bytes = body.as_bytes();
    let mut i = 0;
    let mut text_start = 0;

    while i < bytes.len() {
        if stack.is_empty() {
            return;
        }
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        out.push_str(&escape_text(&body[text_start..i]));
        let rest = &body[i..];

        let consumed = if rest.starts_with("<!--") {
            rest[4..].find("-->").map(|p| 4 + p + 3)
        } else if rest.starts_with("<![CDATA[") {
            rest[9..].find("]]>").map(|p| 9 + p + 3)
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            tag_end(rest, 0).map(|e| e + 1)
        } else if let Some(close) = rest.strip_prefix("</") {
            match tag_end(rest, 0) {
                Some(e) => {
                    close_element(tag_name(close), stack, out);
                    i += e + 1;
                    text_start = i;
                    continue;
                }
                None => None,
            }
        } else {
            match rest[1..].chars().next() {
                // `<` is the last byte so far.
                None => None,
                Some(c) if is_name_start(c) => match tag_end(rest, 0) {
                    Some(e) => {
                        let tag = &rest[..=e];
                        let self_closing = is_self_closing(tag);
                        // Invalid element names are skipped; their closes go unmatched.
                        if let Some(repaired) = repair_start_tag(tag, self_closing) {
                            if !self_closing {
                                stack.push(tag_name(&tag[1..]).to_string());
                            }
                            out.push_str(&repaired);
                        }
                        i += e + 1;
                        text_start = i;
                        continue;
                    }
                    None => None,
                },
                Some(_) => {
                    out.push_str("&lt;");
                    i += 1;
                    text_start = i;
                    continue;
                }
            }
        };

        match consumed {
            Some(len) => {
                out.push_str(&rest[..len]);
                i += len;
                text_start = i;
            }
            // Cut mid-markup: drop everything from this `<` on.
            None => return,
        }
    }

    if !stack.is_empty() {
        out.push_str(&escape_text(trim_partial_reference(&body[text_start..])));
    }
}

/// Close `name`, first closing anything opened after it. Unmatched closes are dropped.
fn close_element(name: &str, stack: &mut Vec<String>, out: &mut String) {
    let Some(pos) = stack.iter().rposition(|open| open == name) else {
        return;
    };
    for open in stack.drain(pos..).rev() {
        out.push_str("</");
        out.push_str(&open);
        out.push('>');
    }
}

/// Drop a character reference cut off at the end of the text (`a &am`).
///
/// `AT&T 1` is left alone: a space can never be part of a reference.
#[inline]
fn trim_partial_reference(text: &str) -> &str {
    match text.rfind('&') {
        Some(amp)
            if text[amp + 1..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '#') =>
        {
            &text[..amp]
        }
        _ => text,
    }
}
