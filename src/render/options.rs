//! Per-call draw configuration.
//!
//! Options are scoped to a single draw call and never retained by a backend.

use serde::Deserialize;

use super::gradient::LinearGradient;
use crate::common::unit::{angle_to_degrees, emu_to_px_f64};

/// Shape fill.
///
/// Deserializes from a bare paint string (`"#FF0000"`, `"rgba(...)"`) or a
/// tagged object `{"type": "solid", "color": ...}` /
/// `{"type": "gradient", "gradient": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FillRepr")]
pub enum Fill {
    /// Hex or `rgba(...)` paint.
    Solid(String),
    Gradient(LinearGradient),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FillRepr {
    Paint(String),
    Tagged(TaggedFill),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum TaggedFill {
    Solid { color: String },
    Gradient { gradient: LinearGradient },
}

impl From<FillRepr> for Fill {
    fn from(repr: FillRepr) -> Self {
        match repr {
            FillRepr::Paint(paint) | FillRepr::Tagged(TaggedFill::Solid { color: paint }) => {
                Fill::Solid(paint)
            },
            FillRepr::Tagged(TaggedFill::Gradient { gradient }) => Fill::Gradient(gradient),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum LineCap {
    #[default]
    #[serde(rename = "flat", alias = "butt")]
    Flat,
    #[serde(rename = "rnd", alias = "round")]
    Round,
    #[serde(rename = "sq", alias = "square")]
    Square,
}

impl LineCap {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Flat => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
    Miter,
}

impl LineJoin {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Bevel => "bevel",
            Self::Miter => "miter",
        }
    }
}

/// Compound line type (`a:ln/@cmpd`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum CompoundLine {
    #[default]
    #[serde(rename = "sng")]
    Single,
    #[serde(rename = "dbl")]
    Double,
    #[serde(rename = "thickThin")]
    ThickThin,
    #[serde(rename = "thinThick")]
    ThinThick,
    #[serde(rename = "tri")]
    Triple,
}

/// Line stroke. `width` is in pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stroke {
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    /// Preset dash name (`a:prstDash`), `solid` or absent for a plain line.
    #[serde(default)]
    pub dash: Option<String>,
    #[serde(default)]
    pub cap: Option<LineCap>,
    #[serde(default)]
    pub join: Option<LineJoin>,
    #[serde(default)]
    pub cmpd: Option<CompoundLine>,
}

fn default_stroke_width() -> f64 {
    1.0
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            dash: None,
            cap: None,
            join: None,
            cmpd: None,
        }
    }

    pub fn with_dash(mut self, dash: impl Into<String>) -> Self {
        self.dash = Some(dash.into());
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = Some(cap);
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = Some(join);
        self
    }

    pub fn with_compound(mut self, cmpd: CompoundLine) -> Self {
        self.cmpd = Some(cmpd);
        self
    }
}

/// Outer shadow (`a:outerShdw`) in pixels and degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterShadow {
    /// Paint string, usually `rgba(...)`.
    pub color: String,
    #[serde(default)]
    pub blur_rad: f64,
    #[serde(default)]
    pub dist: f64,
    /// Direction the shadow is cast, clockwise from the positive x axis.
    #[serde(default)]
    pub dir: f64,
}

impl OuterShadow {
    pub fn new(color: impl Into<String>, blur_rad: f64, dist: f64, dir: f64) -> Self {
        Self {
            color: color.into(),
            blur_rad,
            dist,
            dir,
        }
    }

    /// Build from document units: EMU distances and 60000ths of a degree.
    pub fn from_emu(color: impl Into<String>, blur_rad: i64, dist: i64, dir: i64) -> Self {
        Self::new(
            color,
            emu_to_px_f64(blur_rad as f64),
            emu_to_px_f64(dist as f64),
            angle_to_degrees(dir as f64),
        )
    }

    /// Shadow offset `(dx, dy)` in pixels.
    pub fn offset(&self) -> (f64, f64) {
        let (sin, cos) = self.dir.to_radians().sin_cos();
        (self.dist * cos, self.dist * sin)
    }
}

/// Draw effect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    #[serde(rename = "outerShdw")]
    OuterShadow(OuterShadow),
}

/// Configuration for one draw call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub effect: Option<Effect>,
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, paint: impl Into<String>) -> Self {
        self.fill = Some(Fill::Solid(paint.into()));
        self
    }

    pub fn with_gradient(mut self, gradient: LinearGradient) -> Self {
        self.fill = Some(Fill::Gradient(gradient));
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_shadow(mut self, shadow: OuterShadow) -> Self {
        self.effect = Some(Effect::OuterShadow(shadow));
        self
    }

    pub fn shadow(&self) -> Option<&OuterShadow> {
        match &self.effect {
            Some(Effect::OuterShadow(shadow)) => Some(shadow),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Text run styling for `draw_text`. `(x, y)` is the baseline origin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextOptions {
    pub font_family: Option<String>,
    /// Pixels.
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    /// Paint string; black when absent.
    pub color: Option<String>,
    pub anchor: TextAnchor,
    pub effect: Option<Effect>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 18.0,
            bold: false,
            italic: false,
            color: None,
            anchor: TextAnchor::Start,
            effect: None,
        }
    }
}

impl TextOptions {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn shadow(&self) -> Option<&OuterShadow> {
        match &self.effect {
            Some(Effect::OuterShadow(shadow)) => Some(shadow),
            None => None,
        }
    }
}
