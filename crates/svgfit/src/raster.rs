#![forbid(unsafe_code)]

use std::str::FromStr;
use svgfit_core::Normalizer;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Transform(#[from] svgfit_core::Error),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color `{0}`")]
    Background(String),
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixels per `viewBox` unit.
    pub scale: f32,
    /// Any SVG color (`white`, `#fff8`, `rgb(0, 0, 0)`) or `transparent`.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Normalizes `text` and rasterizes the result as PNG.
pub fn render_png_sync(
    normalizer: &Normalizer,
    text: &str,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = normalizer.transform_sync(text)?;
    svg_to_png(&svg, raster)
}

/// Normalizes `text` and rasterizes the result as JPG.
pub fn render_jpeg_sync(
    normalizer: &Normalizer,
    text: &str,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = normalizer.transform_sync(text)?;
    svg_to_jpeg(&svg, raster)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = options
        .background
        .as_deref()
        .map(parse_background)
        .transpose()?;
    let pixmap = svg_to_pixmap(svg, options.scale, background)?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let color = parse_background(options.background.as_deref().unwrap_or("white"))?;
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(color))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // The background is opaque, so every pixel has alpha 255 and the channel can be dropped.
    let mut rgb = Vec::with_capacity((w as usize) * (h as usize) * 3);
    for px in pixmap.data().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

fn svg_to_pixmap(
    svg: &str,
    scale: f32,
    background: Option<tiny_skia::Color>,
) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Normalized documents have no width/height, so the size comes from the viewBox.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_background(text: &str) -> Result<tiny_skia::Color> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("transparent") {
        return Ok(tiny_skia::Color::TRANSPARENT);
    }
    let color =
        svgtypes::Color::from_str(text).map_err(|_| RasterError::Background(text.to_string()))?;
    Ok(tiny_skia::Color::from_rgba8(
        color.red,
        color.green,
        color.blue,
        color.alpha,
    ))
}
