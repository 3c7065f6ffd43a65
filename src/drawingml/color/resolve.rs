//! Color descriptor resolution against a slide context.

use serde::Deserialize;

use super::css::format_paint;
use super::descriptor::{ColorDescriptor, ColorSource};
use super::preset::{preset_color, system_color};
use super::rgb::RGBColor;
use super::theme::SchemeSlot;
use super::transform::{luminance_rgb, saturation_rgb, shade_rgb, tint_rgb};
use crate::common::unit::percent_to_ratio;
use crate::drawingml::context::SlideContext;

/// Placeholder token that stands in for the color of a style reference.
pub const PLACEHOLDER_COLOR: &str = "phClr";

/// A resolved color split into hex and opacity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorAlpha {
    /// `#RRGGBB`
    pub color: String,
    /// Opacity in `[0, 1]`
    #[serde(default = "opaque_alpha")]
    pub alpha: f64,
}

fn opaque_alpha() -> f64 {
    1.0
}

impl ColorAlpha {
    pub fn new(color: impl Into<String>, alpha: f64) -> Self {
        Self {
            color: color.into(),
            alpha,
        }
    }

    pub fn opaque(color: impl Into<String>) -> Self {
        Self::new(color, 1.0)
    }

    /// CSS paint form: the hex when opaque, `rgba(...)` otherwise.
    pub fn to_paint(&self) -> String {
        format_paint(&self.color, self.alpha)
    }
}

/// Resolve a descriptor to a paint string.
///
/// Returns the plain hex when the color is opaque and `rgba(r, g, b, a)` when
/// it carries alpha below one. `None` when the descriptor or theme is absent
/// or the reference cannot be resolved.
///
/// # Examples
///
/// ```rust
/// use litchi_render::drawingml::color::{resolve_color, ColorDescriptor, ColorScheme, SchemeSlot, Theme};
/// use litchi_render::drawingml::SlideContext;
///
/// let theme = Theme::new("Office", ColorScheme::new().with(SchemeSlot::Accent1, "#FF0000"));
/// let ctx = SlideContext::new(theme);
/// assert_eq!(resolve_color(Some(&ColorDescriptor::scheme("accent1")), &ctx).as_deref(), Some("#FF0000"));
/// ```
pub fn resolve_color(descriptor: Option<&ColorDescriptor>, ctx: &SlideContext) -> Option<String> {
    resolve_color_alpha(descriptor, ctx).map(|c| c.to_paint())
}

/// Resolve a descriptor to `{color, alpha}` regardless of the alpha value.
pub fn resolve_color_alpha(
    descriptor: Option<&ColorDescriptor>,
    ctx: &SlideContext,
) -> Option<ColorAlpha> {
    let descriptor = descriptor?;
    let Some(theme) = ctx.theme.as_ref() else {
        log::debug!("no theme in slide context; color {:?} unresolved", descriptor.source);
        return None;
    };

    let color = match &descriptor.source {
        ColorSource::Srgb(hex) => normalize_hex(hex),
        ColorSource::Scheme(name) => {
            let slot_name = if name == PLACEHOLDER_COLOR {
                ctx.options.placeholder_slot.as_str()
            } else {
                ctx.color_map.get(name).unwrap_or(name)
            };
            let Some(base) = theme.color_scheme.get_by_name(slot_name) else {
                log::debug!("scheme color '{name}' (slot '{slot_name}') not in theme");
                return None;
            };
            apply_scheme_mods(base, descriptor)
        },
        ColorSource::Preset(name) => match preset_color(name) {
            Some(hex) => hex.to_string(),
            None => {
                log::debug!("unknown preset color '{name}'");
                return None;
            },
        },
        ColorSource::Sys(name) => {
            match descriptor.mods.last_clr.as_deref() {
                Some(last) => normalize_hex(last),
                None => match system_color(name) {
                    Some(hex) => hex.to_string(),
                    None => {
                        log::debug!("unknown system color '{name}'");
                        return None;
                    },
                },
            }
        },
    };

    Some(ColorAlpha::new(color, descriptor.alpha_ratio()))
}

/// Resolve a scheme slot directly, bypassing the color map.
pub fn scheme_color(slot: SchemeSlot, ctx: &SlideContext) -> Option<&str> {
    ctx.theme.as_ref()?.color_scheme.get(slot)
}

/// Transform order is fixed: tint, shade, luminance, saturation.
fn apply_scheme_mods(base: &str, descriptor: &ColorDescriptor) -> String {
    let mods = &descriptor.mods;
    if mods.tint.is_none()
        && mods.shade.is_none()
        && mods.lum_mod.is_none()
        && mods.lum_off.is_none()
        && mods.sat_mod.is_none()
    {
        return normalize_hex(base);
    }
    let Some(mut c) = RGBColor::from_hex(base) else {
        return base.to_string();
    };
    if let Some(tint) = mods.tint {
        c = tint_rgb(c, percent_to_ratio(tint));
    }
    if let Some(shade) = mods.shade {
        c = shade_rgb(c, percent_to_ratio(shade));
    }
    if mods.lum_mod.is_some() || mods.lum_off.is_some() {
        c = luminance_rgb(c, mods.lum_mod, mods.lum_off);
    }
    if let Some(sat_mod) = mods.sat_mod {
        c = saturation_rgb(c, sat_mod);
    }
    c.to_css_hex()
}

fn normalize_hex(hex: &str) -> String {
    if hex.starts_with('#') {
        hex.to_string()
    } else {
        format!("#{hex}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawingml::color::{ColorScheme, Theme};
    use crate::drawingml::context::{ColorMap, ResolveOptions};

    fn ctx() -> SlideContext {
        let scheme = ColorScheme::new()
            .with(SchemeSlot::Dark1, "#000000")
            .with(SchemeSlot::Light1, "#FFFFFF")
            .with(SchemeSlot::Accent1, "#FF0000")
            .with(SchemeSlot::Accent2, "#00FF00");
        SlideContext::new(Theme::new("Test", scheme))
    }

    fn resolve(desc: ColorDescriptor) -> Option<String> {
        resolve_color(Some(&desc), &ctx())
    }

    #[test]
    fn test_srgb_passthrough() {
        assert_eq!(resolve(ColorDescriptor::srgb("#00FF00")).as_deref(), Some("#00FF00"));
        assert_eq!(resolve(ColorDescriptor::srgb("4472c4")).as_deref(), Some("#4472c4"));
    }

    #[test]
    fn test_srgb_alpha() {
        assert_eq!(
            resolve(ColorDescriptor::srgb("#FF0000").with_alpha(50_000.0)).as_deref(),
            Some("rgba(255, 0, 0, 0.5)")
        );
    }

    #[test]
    fn test_scheme_through_color_map() {
        assert_eq!(resolve(ColorDescriptor::scheme("accent1")).as_deref(), Some("#FF0000"));
        assert_eq!(resolve(ColorDescriptor::scheme("tx1")).as_deref(), Some("#000000"));
        assert_eq!(resolve(ColorDescriptor::scheme("bg1")).as_deref(), Some("#FFFFFF"));
        // unmapped tokens are tried as slot names directly
        let ctx = ctx().with_color_map(ColorMap::new());
        assert_eq!(
            resolve_color(Some(&ColorDescriptor::scheme("dk1")), &ctx).as_deref(),
            Some("#000000")
        );
    }

    #[test]
    fn test_placeholder_fallback_is_configurable() {
        assert_eq!(resolve(ColorDescriptor::scheme("phClr")).as_deref(), Some("#FF0000"));
        let ctx = ctx().with_options(ResolveOptions {
            placeholder_slot: SchemeSlot::Accent2,
        });
        assert_eq!(
            resolve_color(Some(&ColorDescriptor::scheme("phClr")), &ctx).as_deref(),
            Some("#00FF00")
        );
    }

    #[test]
    fn test_scheme_transforms_in_order() {
        // tint 0 is a no-op, shade 50% halves every channel
        let desc = ColorDescriptor::scheme("accent1")
            .with_shade(50_000.0)
            .with_tint(0.0);
        assert_eq!(resolve(desc).as_deref(), Some("#800000"));

        let desc = ColorDescriptor::scheme("accent1").with_lum_mod(50_000.0);
        assert_eq!(resolve(desc).as_deref(), Some("#800000"));

        let desc = ColorDescriptor::scheme("accent1").with_sat_mod(0.0);
        assert_eq!(resolve(desc).as_deref(), Some("#808080"));
    }

    #[test]
    fn test_preset_and_system() {
        assert_eq!(resolve(ColorDescriptor::preset("white")).as_deref(), Some("#FFFFFF"));
        assert_eq!(resolve(ColorDescriptor::preset("nope")), None);
        assert_eq!(
            resolve(ColorDescriptor::system("windowText", Some("1F1F1F".to_string()))).as_deref(),
            Some("#1F1F1F")
        );
        assert_eq!(resolve(ColorDescriptor::system("window", None)).as_deref(), Some("#FFFFFF"));
        assert_eq!(resolve(ColorDescriptor::system("nope", None)), None);
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(resolve_color(None, &ctx()), None);
        assert_eq!(resolve(ColorDescriptor::scheme("accent6")), None);
        assert_eq!(
            resolve_color(Some(&ColorDescriptor::srgb("#000000")), &SlideContext::default()),
            None
        );
    }

    #[test]
    fn test_object_form_always_carries_alpha() {
        let c = resolve_color_alpha(Some(&ColorDescriptor::scheme("accent1")), &ctx()).unwrap();
        assert_eq!(c, ColorAlpha::new("#FF0000", 1.0));

        let c = resolve_color_alpha(
            Some(&ColorDescriptor::srgb("#0000FF").with_alpha(25_000.0)),
            &ctx(),
        )
        .unwrap();
        assert_eq!(c, ColorAlpha::new("#0000FF", 0.25));
        assert_eq!(c.to_paint(), "rgba(0, 0, 255, 0.25)");
    }

    #[test]
    fn test_scheme_color_direct() {
        assert_eq!(scheme_color(SchemeSlot::Accent2, &ctx()), Some("#00FF00"));
        assert_eq!(scheme_color(SchemeSlot::Accent3, &ctx()), None);
    }
}
