//! `viewBox` parsing and normalization.
//!
//! Model output frequently carries a `viewBox` that lost its separators or
//! has the wrong number of components. [`normalize_viewbox`] turns any such
//! value into four numeric tokens so the document stays renderable; it does
//! not try to recover the exact original numbers.

use std::fmt;
use std::str::FromStr;

/// The canonical fallback used whenever a value cannot be recovered.
pub const DEFAULT_VIEWBOX: ViewBox = ViewBox {
    min_x: 0.0,
    min_y: 0.0,
    width: 800.0,
    height: 600.0,
};

/// The four components of an SVG `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Parse a normalized value. Never fails; see [`normalize_viewbox`].
    pub fn parse_lenient(raw: &str) -> Self {
        normalize_viewbox(raw)
            .parse()
            .unwrap_or(DEFAULT_VIEWBOX)
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        DEFAULT_VIEWBOX
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// Error returned when a string is not exactly four numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid viewBox `{0}`: expected four numbers")]
pub struct ParseViewBoxError(pub String);

impl FromStr for ViewBox {
    type Err = ParseViewBoxError;

    /// Strict parse: exactly four whitespace/comma separated numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = tokens(s)
            .map(|t| t.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseViewBoxError(s.to_string()))?;

        match values.as_slice() {
            &[min_x, min_y, width, height] if values.iter().all(|v| v.is_finite()) => {
                Ok(Self::new(min_x, min_y, width, height))
            }
            _ => Err(ParseViewBoxError(s.to_string())),
        }
    }
}

/// Normalize a raw `viewBox` value to four space-separated numeric tokens.
///
/// - whitespace runs and commas collapse to single spaces
/// - four numeric tokens are returned unchanged
/// - a delimiter-less numeric run of 6+ chars is split 1 / 1 / 3 / rest
/// - anything else becomes `0 0 800 600`
pub fn normalize_viewbox(raw: &str) -> String {
    let collapsed = tokens(raw).collect::<Vec<_>>().join(" ");

    if collapsed.split(' ').count() == 4 && collapsed.split(' ').all(is_number) {
        return collapsed;
    }

    if !collapsed.contains(' ') && collapsed.len() >= 6 && is_numeric_run(&collapsed) {
        // Only ASCII reaches here, byte slicing is char slicing.
        let (first, rest) = collapsed.split_at(1);
        let (second, rest) = rest.split_at(1);
        let (third, fourth) = rest.split_at(3);
        let split = format!("{first} {second} {third} {fourth}");
        if split.split(' ').all(is_number) {
            return split;
        }
    }

    DEFAULT_VIEWBOX.to_string()
}

#[inline]
fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

#[inline]
fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}

#[inline]
fn is_numeric_run(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b'-')
}
