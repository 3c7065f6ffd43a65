//! Glyph rasterization with fontdue.

use fontdue::Font;
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use tiny_skia::{Color, ColorU8, IntSize, Pixmap, PixmapPaint, Transform};

use crate::render::options::TextAnchor;

/// A rasterized glyph placed relative to the text origin.
struct PlacedGlyph {
    x: f32,
    y: f32,
    coverage: Pixmap,
}

/// Lay out and rasterize `content` in `color`. `(x, y)` is the baseline
/// origin; `anchor` aligns the run horizontally around it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text(
    target: &mut Pixmap,
    font: &Font,
    content: &str,
    x: f32,
    y: f32,
    size: f32,
    anchor: TextAnchor,
    color: Color,
    transform: Transform,
) {
    if content.is_empty() || !(size > 0.0) {
        return;
    }
    let glyphs = rasterize(font, content, size, color);
    if glyphs.is_empty() {
        return;
    }

    let ascent = font.horizontal_line_metrics(size).map(|m| m.ascent).unwrap_or(size * 0.8);
    let advance = run_width(font, content, size);
    let start_x = match anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - advance / 2.0,
        TextAnchor::End => x - advance,
    };
    let top = y - ascent;

    for glyph in glyphs {
        let ts = transform.pre_translate(start_x + glyph.x, top + glyph.y);
        target.draw_pixmap(0, 0, glyph.coverage.as_ref(), &PixmapPaint::default(), ts, None);
    }
}

/// Horizontal advance of the laid-out run.
pub(crate) fn run_width(font: &Font, content: &str, size: f32) -> f32 {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(content, size, 0));
    layout
        .glyphs()
        .iter()
        .map(|g| {
            let m = font.metrics_indexed(g.key.glyph_index, size);
            g.x - m.xmin as f32 + m.advance_width
        })
        .fold(0.0, f32::max)
}

fn rasterize(font: &Font, content: &str, size: f32, color: Color) -> Vec<PlacedGlyph> {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(content, size, 0));

    let rgba = color.to_color_u8();
    layout
        .glyphs()
        .iter()
        .filter(|g| g.width > 0 && g.height > 0)
        .filter_map(|g| {
            let (metrics, bitmap) = font.rasterize_config(g.key);
            let size = IntSize::from_wh(metrics.width as u32, metrics.height as u32)?;
            let mut coverage = Pixmap::new(size.width(), size.height())?;
            for (pixel, &cov) in coverage.pixels_mut().iter_mut().zip(&bitmap) {
                let alpha = (u32::from(cov) * u32::from(rgba.alpha()) + 127) / 255;
                *pixel = ColorU8::from_rgba(rgba.red(), rgba.green(), rgba.blue(), alpha as u8).premultiply();
            }
            Some(PlacedGlyph {
                x: g.x,
                y: g.y,
                coverage,
            })
        })
        .collect()
}
