//! Intrinsic size of an extracted SVG, used when exporting.

use super::attr::{find_attr, leading_number};
use super::viewbox::ViewBox;

/// Size used when neither the viewBox nor width/height give one.
pub const FALLBACK_DIMENSIONS: Dimensions = Dimensions {
    width: 300.0,
    height: 150.0,
};

/// Width and height in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn scaled(self, scale: f64) -> Self {
        Self {
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// Measure an SVG document.
///
/// Order: viewBox width/height, then the `width`/`height` attributes (units
/// ignored), then [`FALLBACK_DIMENSIONS`].
pub fn measure(svg: &str) -> Dimensions {
    let Some(root) = root_tag(svg) else {
        return FALLBACK_DIMENSIONS;
    };

    let from_viewbox = find_attr(root, "viewBox")
        .and_then(|attr| attr.value.parse::<ViewBox>().ok())
        .filter(|vb| vb.width > 0.0 && vb.height > 0.0)
        .map(|vb| Dimensions {
            width: vb.width,
            height: vb.height,
        });

    from_viewbox
        .or_else(|| {
            let width = find_attr(root, "width").and_then(|a| leading_number(a.value))?;
            let height = find_attr(root, "height").and_then(|a| leading_number(a.value))?;
            (width > 0.0 && height > 0.0).then_some(Dimensions { width, height })
        })
        .unwrap_or(FALLBACK_DIMENSIONS)
}

/// The `<svg ...>` start tag, if complete.
fn root_tag(svg: &str) -> Option<&str> {
    let start = svg.find("<svg")?;
    let end = start + svg[start..].find('>')?;
    Some(&svg[start..=end])
}
