//! Paint state shared by the raster draw calls.

use tiny_skia::{
    Color, FillRule, GradientStop as SkGradientStop, LinearGradient as SkLinearGradient, Paint,
    Path, PathBuilder, Pixmap, Point, Shader, SpreadMode, Stroke as SkStroke, StrokeDash, Transform,
};

use crate::drawingml::color::{RGBColor, parse_paint};
use crate::drawingml::geometry::{PathCommand, PathData};
use crate::render::dash::dash_array;
use crate::render::gradient::LinearGradient;
use crate::render::options::{DrawOptions, Fill, LineCap, LineJoin, OuterShadow, Stroke};

/// Convert a paint string; `None` when unreadable or fully transparent.
pub(crate) fn paint_color(paint: &str) -> Option<Color> {
    let rgba = parse_paint(paint)?;
    if rgba.is_transparent() {
        return None;
    }
    let RGBColor { r, g, b } = rgba.rgb;
    Some(Color::from_rgba8(r, g, b, rgba.alpha_u8()))
}

#[derive(Debug, Clone)]
pub(crate) enum FillStyle {
    Solid(Color),
    Gradient {
        start: Point,
        end: Point,
        stops: Vec<(f32, Color)>,
    },
}

impl FillStyle {
    fn shader(&self) -> Option<Shader<'static>> {
        match self {
            Self::Solid(color) => Some(Shader::SolidColor(*color)),
            Self::Gradient { start, end, stops } => SkLinearGradient::new(
                *start,
                *end,
                stops.iter().map(|&(pos, color)| SkGradientStop::new(pos, color)).collect(),
                SpreadMode::Pad,
                Transform::identity(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StrokeStyle {
    pub color: Color,
    pub stroke: SkStroke,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ShadowState {
    pub color: Color,
    pub sigma: f32,
    pub dx: f32,
    pub dy: f32,
}

/// What to paint with: the loaded styles, or a flat silhouette color for
/// shadow layers.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Ink {
    Styled,
    Silhouette(Color),
}

/// Fill, stroke and shadow state. Draw calls load it from their options and
/// the shadow is reset to neutral once the call finishes.
#[derive(Debug, Clone, Default)]
pub(crate) struct PaintContext {
    pub fill: Option<FillStyle>,
    pub stroke: Option<StrokeStyle>,
    pub shadow: Option<ShadowState>,
}

impl PaintContext {
    /// Load styles for one call; `bounds` places gradients.
    pub(crate) fn load(&mut self, options: &DrawOptions, bounds: (f64, f64, f64, f64)) {
        self.fill = match &options.fill {
            Some(Fill::Solid(paint)) => paint_color(paint).map(FillStyle::Solid),
            Some(Fill::Gradient(gradient)) => gradient_style(gradient, bounds),
            None => None,
        };
        self.stroke = options.stroke.as_ref().and_then(|s| stroke_style(s, s.width));
        self.shadow = options.shadow().and_then(shadow_state);
    }

    pub(crate) fn load_stroke(&mut self, stroke: &Stroke, width: f64) {
        self.fill = None;
        self.stroke = stroke_style(stroke, width);
    }

    pub(crate) fn load_shadow(&mut self, shadow: Option<&OuterShadow>) {
        self.shadow = shadow.and_then(shadow_state);
    }

    pub(crate) fn reset_effects(&mut self) {
        self.shadow = None;
    }

    /// Fill then stroke `path` onto `pixmap`.
    pub(crate) fn paint_path(
        &self,
        pixmap: &mut Pixmap,
        path: &Path,
        transform: Transform,
        ink: Ink,
        anti_alias: bool,
    ) {
        if let Some(fill) = &self.fill {
            let shader = match ink {
                Ink::Styled => fill.shader(),
                Ink::Silhouette(color) => Some(Shader::SolidColor(color)),
            };
            if let Some(shader) = shader {
                let paint = Paint {
                    shader,
                    anti_alias,
                    ..Default::default()
                };
                pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
            }
        }
        if let Some(style) = &self.stroke {
            let color = match ink {
                Ink::Styled => style.color,
                Ink::Silhouette(color) => color,
            };
            let paint = Paint {
                shader: Shader::SolidColor(color),
                anti_alias,
                ..Default::default()
            };
            pixmap.stroke_path(path, &paint, &style.stroke, transform, None);
        }
    }
}

fn gradient_style(gradient: &LinearGradient, bounds: (f64, f64, f64, f64)) -> Option<FillStyle> {
    if gradient.stops.is_empty() {
        log::debug!("gradient fill without stops ignored");
        return None;
    }
    let (x, y, w, h) = bounds;
    let ((x1, y1), (x2, y2)) = gradient.line(x, y, w, h);
    let stops = gradient
        .stops
        .iter()
        .map(|stop| {
            let color = parse_paint(&stop.color.color)
                .map(|rgba| {
                    let RGBColor { r, g, b } = rgba.rgb;
                    let alpha = (rgba.alpha * stop.color.alpha).clamp(0.0, 1.0);
                    Color::from_rgba8(r, g, b, (alpha * 255.0).round() as u8)
                })
                .unwrap_or(Color::TRANSPARENT);
            (stop.position as f32, color)
        })
        .collect();
    Some(FillStyle::Gradient {
        start: Point::from_xy(x1 as f32, y1 as f32),
        end: Point::from_xy(x2 as f32, y2 as f32),
        stops,
    })
}

fn stroke_style(stroke: &Stroke, width: f64) -> Option<StrokeStyle> {
    if !(width > 0.0) {
        return None;
    }
    let color = paint_color(&stroke.color)?;
    let mut sk = SkStroke {
        width: width as f32,
        line_cap: match stroke.cap.unwrap_or_default() {
            LineCap::Flat => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: match stroke.join.unwrap_or_default() {
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
        },
        ..Default::default()
    };
    sk.dash = stroke
        .dash
        .as_deref()
        .and_then(|name| dash_array(name, stroke.width))
        .and_then(|array| StrokeDash::new(array.iter().map(|d| *d as f32).collect(), 0.0));
    Some(StrokeStyle { color, stroke: sk })
}

fn shadow_state(shadow: &OuterShadow) -> Option<ShadowState> {
    let color = paint_color(&shadow.color)?;
    let (dx, dy) = shadow.offset();
    Some(ShadowState {
        color,
        sigma: (shadow.blur_rad / 2.0).max(0.0) as f32,
        dx: dx as f32,
        dy: dy as f32,
    })
}

/// Convert path data, lowering arcs to cubics. `None` for empty or
/// degenerate paths.
pub(crate) fn to_skia_path(path: &PathData) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for cmd in path.to_cubics().commands() {
        match *cmd {
            PathCommand::MoveTo { x, y } => pb.move_to(x as f32, y as f32),
            PathCommand::LineTo { x, y } => pb.line_to(x as f32, y as f32),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => pb.cubic_to(x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32),
            PathCommand::QuadTo { x1, y1, x, y } => pb.quad_to(x1 as f32, y1 as f32, x as f32, y as f32),
            PathCommand::Close => pb.close(),
            // Lowered by to_cubics
            PathCommand::Arc { x, y, .. } => pb.line_to(x as f32, y as f32),
        }
    }
    pb.finish()
}
