//! Abstract color descriptors as produced by the DrawingML attribute parser.

use serde::Deserialize;

/// Where the base color of a descriptor comes from.
///
/// Deserializes from the single key that names the color source, e.g.
/// `{"srgb": "#4472C4"}` or `{"scheme": "accent1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSource {
    /// Literal `a:srgbClr` hex value
    Srgb(String),
    /// Theme slot or placeholder token (`a:schemeClr`)
    Scheme(String),
    /// Named preset (`a:prstClr`)
    Preset(String),
    /// Operating-system color (`a:sysClr`)
    Sys(String),
}

/// Optional color modifiers, all in 1/100000 units.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorMods {
    pub tint: Option<f64>,
    pub shade: Option<f64>,
    pub lum_mod: Option<f64>,
    pub lum_off: Option<f64>,
    pub sat_mod: Option<f64>,
    pub alpha: Option<f64>,
    /// Last computed value of a system color, written by the authoring application
    pub last_clr: Option<String>,
}

/// A color reference plus its modifiers. Immutable once parsed.
///
/// # Examples
///
/// ```rust
/// use litchi_render::drawingml::color::ColorDescriptor;
///
/// let accent = ColorDescriptor::scheme("accent1").with_lum_mod(75_000.0);
/// assert_eq!(accent.mods.lum_mod, Some(75_000.0));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorDescriptor {
    #[serde(flatten)]
    pub source: ColorSource,
    #[serde(flatten)]
    pub mods: ColorMods,
}

impl ColorDescriptor {
    pub fn new(source: ColorSource) -> Self {
        Self {
            source,
            mods: ColorMods::default(),
        }
    }

    pub fn srgb(hex: impl Into<String>) -> Self {
        Self::new(ColorSource::Srgb(hex.into()))
    }

    pub fn scheme(name: impl Into<String>) -> Self {
        Self::new(ColorSource::Scheme(name.into()))
    }

    pub fn preset(name: impl Into<String>) -> Self {
        Self::new(ColorSource::Preset(name.into()))
    }

    pub fn system(name: impl Into<String>, last_clr: Option<String>) -> Self {
        let mut desc = Self::new(ColorSource::Sys(name.into()));
        desc.mods.last_clr = last_clr;
        desc
    }

    pub fn with_tint(mut self, tint: f64) -> Self {
        self.mods.tint = Some(tint);
        self
    }

    pub fn with_shade(mut self, shade: f64) -> Self {
        self.mods.shade = Some(shade);
        self
    }

    pub fn with_lum_mod(mut self, lum_mod: f64) -> Self {
        self.mods.lum_mod = Some(lum_mod);
        self
    }

    pub fn with_lum_off(mut self, lum_off: f64) -> Self {
        self.mods.lum_off = Some(lum_off);
        self
    }

    pub fn with_sat_mod(mut self, sat_mod: f64) -> Self {
        self.mods.sat_mod = Some(sat_mod);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.mods.alpha = Some(alpha);
        self
    }

    /// Alpha normalized to `[0, 1]`; absent alpha is fully opaque.
    pub fn alpha_ratio(&self) -> f64 {
        self.mods
            .alpha
            .map(|a| (a / 100_000.0).clamp(0.0, 1.0))
            .unwrap_or(1.0)
    }
}
