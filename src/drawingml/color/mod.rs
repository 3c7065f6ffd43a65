//! Theme-aware color resolution.
//!
//! A [`ColorDescriptor`] names a color indirectly (theme slot, preset name,
//! system color) or literally (sRGB), plus optional modifiers. Resolution
//! looks the base color up in the slide's [`Theme`](theme::Theme) through its
//! color map and applies the modifiers in a fixed order:
//! tint, shade, luminance (`lumMod`/`lumOff`), saturation (`satMod`).
//!
//! Everything here is a pure function of its inputs.

// Submodule declarations
pub mod css;
pub mod descriptor;
pub mod preset;
pub mod resolve;
pub mod rgb;
pub mod theme;
pub mod transform;

// Re-exports
pub use css::{Rgba, format_paint, parse_paint};
pub use descriptor::{ColorDescriptor, ColorMods, ColorSource};
pub use resolve::{ColorAlpha, PLACEHOLDER_COLOR, resolve_color, resolve_color_alpha, scheme_color};
pub use rgb::RGBColor;
pub use theme::{ColorScheme, FontScheme, SchemeSlot, Theme};
pub use transform::{
    apply_luminance, apply_saturation, apply_shade, apply_tint, hsl_to_rgb, rgb_to_hsl,
};
