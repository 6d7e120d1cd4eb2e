//! SVG format conversion.
//!
//! Converts an extracted SVG to raster formats (PNG, WebP, JPG) using
//! usvg for parsing, resvg for rendering and `image` for encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};

use super::{ExportError, ExportFormat, ExportOptions};
use crate::svg::{Dimensions, measure};

/// Convert SVG text to the requested format.
///
/// `svg` format returns the text unchanged.
pub fn convert_svg(svg: &str, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    if options.format == ExportFormat::Svg {
        return Ok(svg.as_bytes().to_vec());
    }

    let size = measure(svg).scaled(options.scale);
    let pixels = render_rgba(svg, size, options.scale)?;
    encode(pixels, options)
}

/// Render SVG to straight (non-premultiplied) RGBA pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_rgba(svg: &str, size: Dimensions, scale: f64) -> Result<RgbaImage, ExportError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;

    let width = size.width.ceil() as u32;
    let height = size.height.ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::InvalidSize {
        width: size.width,
        height: size.height,
    })?;

    // Fit the parsed tree into the measured box.
    let tree_size = tree.size();
    let sx = size.width as f32 / tree_size.width();
    let sy = size.height as f32 / tree_size.height();
    let transform = if sx.is_finite() && sy.is_finite() {
        Transform::from_scale(sx, sy)
    } else {
        Transform::from_scale(scale as f32, scale as f32)
    };
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(width, height, data).ok_or(ExportError::InvalidSize {
        width: size.width,
        height: size.height,
    })
}

/// Encode pixels in the target format.
fn encode(pixels: RgbaImage, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut out = Cursor::new(Vec::new());

    match options.format {
        ExportFormat::Png => {
            DynamicImage::ImageRgba8(pixels).write_to(&mut out, ImageFormat::Png)?
        }
        ExportFormat::Webp => {
            DynamicImage::ImageRgba8(pixels).write_to(&mut out, ImageFormat::WebP)?
        }
        ExportFormat::Jpg => {
            let flattened = flatten_on_white(&pixels);
            JpegEncoder::new_with_quality(&mut out, options.quality).encode_image(&flattened)?;
        }
        ExportFormat::Svg => unreachable!("svg output is returned before rendering"),
    }

    Ok(out.into_inner())
}

/// JPEG has no alpha channel; composite onto white.
#[allow(clippy::cast_possible_truncation)]
fn flatten_on_white(pixels: &RgbaImage) -> image::RgbImage {
    image::RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let [r, g, b, a] = pixels.get_pixel(x, y).0;
        let blend =
            |c: u8| ((u16::from(c) * u16::from(a) + 255 * (255 - u16::from(a))) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><rect width="4" height="4" fill="#ff0000"/></svg>"##;

    fn options(format: ExportFormat) -> ExportOptions {
        ExportOptions {
            format,
            scale: 2.0,
            quality: 90,
        }
    }

    #[test]
    fn test_svg_passthrough() {
        let out = convert_svg(SQUARE, &options(ExportFormat::Svg)).unwrap();
        assert_eq!(out, SQUARE.as_bytes());
    }

    #[test]
    fn test_png_scaled() {
        let out = convert_svg(SQUARE, &options(ExportFormat::Png)).unwrap();
        let decoded = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
        let pixel = decoded.to_rgba8().get_pixel(4, 4).0;
        assert_eq!(pixel, [255, 0, 0, 255]);
    }

    #[test]
    fn test_jpg_encodes() {
        let out = convert_svg(SQUARE, &options(ExportFormat::Jpg)).unwrap();
        assert_eq!(&out[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_unparseable_svg() {
        let err = convert_svg("not svg", &options(ExportFormat::Png)).unwrap_err();
        assert!(matches!(err, ExportError::Parse(_)));
    }

    #[test]
    fn test_flatten_on_white() {
        let mut pixels = RgbaImage::new(1, 1);
        pixels.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
        assert_eq!(flatten_on_white(&pixels).get_pixel(0, 0).0, [255, 255, 255]);
    }
}
