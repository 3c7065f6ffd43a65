use std::collections::HashMap;

use fontdue::{Font, FontSettings};
use serde::Deserialize;
use tiny_skia::{Color, FilterQuality, PathBuilder, Pixmap, PixmapPaint, Rect, Transform};

use super::context::{Ink, PaintContext, paint_color, to_skia_path};
use super::image::{decode_data_uri, decode_pixmap};
use super::shadow::draw_shadow;
use super::text;
use crate::common::error::{Error, Result};
use crate::drawingml::geometry::PathData;
use crate::render::Renderer;
use crate::render::compound::decompose;
use crate::render::matrix::Matrix;
use crate::render::options::{DrawOptions, TextOptions};

/// Raster backend configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterOptions {
    pub width: u32,
    pub height: u32,
    /// Paint string used by `clear`; transparent when absent.
    pub background: Option<String>,
    pub anti_alias: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            background: None,
            anti_alias: true,
        }
    }
}

impl RasterOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, paint: impl Into<String>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn with_anti_alias(mut self, enabled: bool) -> Self {
        self.anti_alias = enabled;
        self
    }
}

/// Immediate-mode renderer over a tiny-skia pixmap.
///
/// Each draw call loads its options into one shared paint context, paints,
/// and then resets the shadow state so effects never leak into the next
/// call. [`Renderer::set_transform`] replaces the current transform.
pub struct RasterRenderer {
    options: RasterOptions,
    pixmap: Pixmap,
    transform: Transform,
    context: PaintContext,
    font: Option<Font>,
    images: HashMap<String, Vec<u8>>,
}

impl RasterRenderer {
    pub fn new(options: RasterOptions) -> Result<Self> {
        let (width, height) = (options.width, options.height);
        let pixmap = Pixmap::new(width, height).ok_or(Error::InvalidDimensions { width, height })?;
        let mut renderer = Self {
            options,
            pixmap,
            transform: Transform::identity(),
            context: PaintContext::default(),
            font: None,
            images: HashMap::new(),
        };
        renderer.fill_background();
        Ok(renderer)
    }

    /// Use the given TrueType/OpenType font for `draw_text`.
    pub fn with_font_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| Error::Font(e.to_string()))?;
        self.font = Some(font);
        Ok(self)
    }

    /// Make encoded image bytes available to `draw_image` under `href`.
    pub fn register_image(&mut self, href: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(href.into(), bytes);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Straight-alpha RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Whether a shadow is still loaded in the paint context.
    pub fn has_active_effect(&self) -> bool {
        self.context.shadow.is_some()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| Error::Encode(e.to_string()))
    }

    fn fill_background(&mut self) {
        let color = self
            .options
            .background
            .as_deref()
            .and_then(paint_color)
            .unwrap_or(Color::TRANSPARENT);
        self.pixmap.fill(color);
    }

    /// Paint `path` with the loaded context, shadow first.
    fn paint(&mut self, path: &tiny_skia::Path) {
        let anti_alias = self.options.anti_alias;
        if let Some(shadow) = self.context.shadow {
            let context = &self.context;
            draw_shadow(&mut self.pixmap, &shadow, self.transform, |layer, ts, ink| {
                context.paint_path(layer, path, ts, ink, anti_alias);
            });
        }
        self.context
            .paint_path(&mut self.pixmap, path, self.transform, Ink::Styled, anti_alias);
    }

    fn draw_with(&mut self, path: Option<tiny_skia::Path>, options: &DrawOptions, bounds: (f64, f64, f64, f64)) {
        self.context.load(options, bounds);
        match path {
            Some(path) => self.paint(&path),
            None => log::trace!("raster: degenerate geometry skipped"),
        }
        self.context.reset_effects();
    }

    fn load_image(&self, href: &str) -> Result<Pixmap> {
        if href.starts_with("data:") {
            return decode_pixmap(&decode_data_uri(href)?);
        }
        match self.images.get(href) {
            Some(bytes) => decode_pixmap(bytes),
            None => Err(Error::ImageDecode(format!("no image registered for {href:?}"))),
        }
    }
}

impl Renderer for RasterRenderer {
    fn clear(&mut self) {
        self.fill_background();
        self.transform = Transform::identity();
        self.context = PaintContext::default();
    }

    fn set_transform(&mut self, matrix: Matrix, group_id: Option<&str>) {
        log::trace!("raster: transform replaced ({group_id:?})");
        let Matrix { a, b, c, d, e, f } = matrix;
        self.transform = Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32);
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, options: &DrawOptions) {
        let path = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32).map(PathBuilder::from_rect);
        self.draw_with(path, options, (x, y, width, height));
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, options: &DrawOptions) {
        let (x, y, w, h) = (cx - rx, cy - ry, rx * 2.0, ry * 2.0);
        let path = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32).and_then(PathBuilder::from_oval);
        self.draw_with(path, options, (x, y, w, h));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &DrawOptions) {
        let Some(stroke) = &options.stroke else {
            return;
        };
        let strokes = decompose(x1, y1, x2, y2, stroke.width, stroke.cmpd.unwrap_or_default());
        self.context.load_shadow(options.shadow());
        for sub in strokes {
            self.context.load_stroke(stroke, sub.width);
            let mut pb = PathBuilder::new();
            pb.move_to(sub.x1 as f32, sub.y1 as f32);
            pb.line_to(sub.x2 as f32, sub.y2 as f32);
            if let Some(path) = pb.finish() {
                self.paint(&path);
            }
        }
        self.context.reset_effects();
    }

    fn draw_path(&mut self, path: &PathData, options: &DrawOptions) {
        let bounds = path
            .control_bounds()
            .map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0, y1 - y0))
            .unwrap_or_default();
        self.draw_with(to_skia_path(path), options, bounds);
    }

    fn draw_text(&mut self, content: &str, x: f64, y: f64, options: &TextOptions) {
        let Some(font) = &self.font else {
            log::debug!("raster: no font loaded, skipping text {content:?}");
            return;
        };
        let color = options
            .color
            .as_deref()
            .and_then(paint_color)
            .unwrap_or(Color::BLACK);
        let (x, y, size) = (x as f32, y as f32, options.font_size as f32);

        self.context.load_shadow(options.shadow());
        if let Some(shadow) = self.context.shadow {
            draw_shadow(&mut self.pixmap, &shadow, self.transform, |layer, ts, ink| {
                if let Ink::Silhouette(shadow_color) = ink {
                    text::draw_text(layer, font, content, x, y, size, options.anchor, shadow_color, ts);
                }
            });
        }
        text::draw_text(&mut self.pixmap, font, content, x, y, size, options.anchor, color, self.transform);
        self.context.reset_effects();
    }

    fn draw_image(&mut self, href: &str, x: f64, y: f64, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let image = match self.load_image(href) {
            Ok(image) => image,
            Err(err) => {
                log::debug!("raster: skipping image: {err}");
                return;
            },
        };
        let sx = width as f32 / image.width() as f32;
        let sy = height as f32 / image.height() as f32;
        let ts = self.transform.pre_translate(x as f32, y as f32).pre_scale(sx, sy);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, ts, None);
    }
}
