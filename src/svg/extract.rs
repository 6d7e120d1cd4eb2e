//! Final-pass extraction of an SVG artifact from model output.
//!
//! The completed text may be a bare document, may be wrapped in a Markdown
//! fence, may carry prose around it, or may be cut off. The rules below are
//! tried in order and the first match wins:
//!
//! | Rule        | Input                                   | Output                       |
//! |-------------|-----------------------------------------|------------------------------|
//! | `Bare`      | trimmed text is `<svg ...>...</svg>`    | input unchanged              |
//! | `Span`      | contains `<svg ...>...</svg>`           | first such span              |
//! | `Unclosed`  | `<svg` without `</svg>`                 | from `<svg` on + `</svg>`    |
//! | `Headless`  | `</svg>` with no `<svg` before it       | synthetic root + content     |
//! | `NotFound`  | anything else                           | input unchanged              |
//!
//! Fences are stripped before every rule except `Bare`.

use std::sync::LazyLock;

use regex::Regex;

use super::SVG_NAMESPACE;

/// Opening fences (```` ```svg ````, ```` ```xml ````, ```` ``` ````) and what follows them.
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:svg|xml)?\s*").unwrap());

/// A closing fence left at the very end.
static FENCE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\s*$").unwrap());

/// First complete `<svg ...>...</svg>` span.
static SVG_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b.*?</svg\s*>").unwrap());

static SVG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<svg\b").unwrap());

static SVG_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</svg\s*>").unwrap());

/// Which rule produced an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractKind {
    /// Already a bare document.
    Bare,
    /// A complete span cut out of surrounding text.
    Span,
    /// Opening tag found, closing tag synthesized.
    Unclosed,
    /// Closing tag found, opening tag synthesized.
    Headless,
    /// No SVG content at all.
    NotFound,
}

/// Result of [`extract_svg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub content: String,
    pub kind: ExtractKind,
}

impl Extraction {
    fn new(content: impl Into<String>, kind: ExtractKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }

    /// True when some SVG content was recovered.
    pub fn is_found(&self) -> bool {
        self.kind != ExtractKind::NotFound
    }
}

/// Extract the SVG payload from `text`.
///
/// Returns `text` unchanged when no SVG is present; use [`extract_svg`] to
/// tell that case apart.
pub fn extract(text: &str) -> String {
    extract_svg(text).content
}

/// Extract the SVG payload from `text`, reporting which rule matched.
pub fn extract_svg(text: &str) -> Extraction {
    let trimmed = text.trim();
    if trimmed.starts_with("<svg") && trimmed.ends_with("</svg>") {
        return Extraction::new(text, ExtractKind::Bare);
    }

    let cleaned = strip_fences(text);

    if let Some(span) = SVG_SPAN.find(&cleaned) {
        return Extraction::new(span.as_str(), ExtractKind::Span);
    }

    let open = SVG_OPEN.find(&cleaned).map(|m| m.start());
    let close = SVG_CLOSE.find(&cleaned).map(|m| (m.start(), m.end()));

    match (open, close) {
        (Some(start), None) => {
            let content = format!("{}</svg>", cleaned[start..].trim_end());
            Extraction::new(content, ExtractKind::Unclosed)
        }
        (open, Some((close_start, close_end))) if open.is_none_or(|o| o > close_start) => {
            // `<` of the closing tag itself is the latest possible start.
            let start = cleaned[..close_start].find('<').unwrap_or(close_start);
            let content = format!(
                r#"<svg xmlns="{SVG_NAMESPACE}">{}"#,
                &cleaned[start..close_end]
            );
            Extraction::new(content, ExtractKind::Headless)
        }
        _ => Extraction::new(text, ExtractKind::NotFound),
    }
}

/// Remove Markdown fence markers, paired or not.
fn strip_fences(text: &str) -> String {
    let without_open = FENCE_OPEN.replace_all(text, "");
    FENCE_CLOSE.replace_all(&without_open, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_returned_as_is() {
        let svg = r#"<svg viewBox="0 0 1 1"><rect/></svg>"#;
        let extraction = extract_svg(svg);
        assert_eq!(extraction.kind, ExtractKind::Bare);
        assert_eq!(extraction.content, svg);

        let padded = format!("\n  {svg}\n");
        assert_eq!(extract(&padded), padded);
    }

    #[test]
    fn test_fenced_svg() {
        let text = "```svg\n<svg width=\"10\" height=\"10\"><rect/></svg>\n```";
        assert_eq!(extract(text), "<svg width=\"10\" height=\"10\"><rect/></svg>");
    }

    #[test]
    fn test_fenced_xml_and_bare_fence() {
        let xml = "```xml\n<svg><g/></svg>\n```\n";
        assert_eq!(extract(xml), "<svg><g/></svg>");
        let bare = "```\n<svg><g/></svg>\n```";
        assert_eq!(extract(bare), "<svg><g/></svg>");
        let upper = "```SVG\n<svg><g/></svg>";
        assert_eq!(extract(upper), "<svg><g/></svg>");
    }

    #[test]
    fn test_prose_discarded() {
        let text = "Here is your icon: <svg viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></svg> Hope you like it!";
        let extraction = extract_svg(text);
        assert_eq!(extraction.kind, ExtractKind::Span);
        assert_eq!(
            extraction.content,
            "<svg viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></svg>"
        );
    }

    #[test]
    fn test_first_span_wins() {
        let text = "Two: <svg id=\"a\"></svg> and <svg id=\"b\"></svg>";
        assert_eq!(extract(text), "<svg id=\"a\"></svg>");
    }

    #[test]
    fn test_multiline_case_insensitive_span() {
        let text = "Result:\n<SVG viewBox=\"0 0 2 2\">\n  <rect/>\n</SVG>\nDone.";
        assert_eq!(extract(text), "<SVG viewBox=\"0 0 2 2\">\n  <rect/>\n</SVG>");
    }

    #[test]
    fn test_unclosed_gets_closing_tag() {
        let text = "<svg><circle cx=\"5\" cy=\"5\" r=\"3\">";
        let extraction = extract_svg(text);
        assert_eq!(extraction.kind, ExtractKind::Unclosed);
        assert_eq!(extraction.content, format!("{text}</svg>"));
    }

    #[test]
    fn test_unclosed_after_prose() {
        let text = "```svg\nSure! <svg viewBox=\"0 0 1 1\"><rect/>";
        assert_eq!(extract(text), "<svg viewBox=\"0 0 1 1\"><rect/></svg>");
    }

    #[test]
    fn test_headless_wrapped() {
        let text = "lost the start ... <path d=\"M0 0\"/><rect/></svg> trailing";
        let extraction = extract_svg(text);
        assert_eq!(extraction.kind, ExtractKind::Headless);
        assert_eq!(
            extraction.content,
            format!("<svg xmlns=\"{SVG_NAMESPACE}\"><path d=\"M0 0\"/><rect/></svg>")
        );
    }

    #[test]
    fn test_not_found_returns_input() {
        let text = "Sorry, I can't draw that.";
        let extraction = extract_svg(text);
        assert_eq!(extraction.kind, ExtractKind::NotFound);
        assert!(!extraction.is_found());
        assert_eq!(extraction.content, text);

        assert_eq!(extract(""), "");
    }

    #[test]
    fn test_svgfoo_is_not_svg() {
        assert_eq!(extract_svg("<svgfoo>x</svgfoo>").kind, ExtractKind::NotFound);
    }
}
