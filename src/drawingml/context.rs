//! Per-slide rendering context shared read-only by the resolvers.

use std::collections::HashMap;

use serde::Deserialize;

use super::color::{SchemeSlot, Theme};
use super::table::TableStyleSheets;

/// Slide color map (`p:clrMap`): placeholder token to theme slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColorMap(HashMap<String, String>);

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping every stock slide master carries.
    pub fn master_default() -> Self {
        let mut map = Self::new();
        for (token, slot) in [
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ] {
            map.insert(token, slot);
        }
        map
    }

    pub fn insert(&mut self, token: impl Into<String>, slot: impl Into<String>) {
        self.0.insert(token.into(), slot.into());
    }

    pub fn with(mut self, token: impl Into<String>, slot: impl Into<String>) -> Self {
        self.insert(token, slot);
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolver behavior that is a rendering choice rather than format truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
    /// Slot substituted for the `phClr` placeholder token when no style
    /// reference supplies one. Defaults to `accent1`.
    pub placeholder_slot: SchemeSlot,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            placeholder_slot: SchemeSlot::Accent1,
        }
    }
}

/// Everything the resolvers read while rendering one slide.
///
/// Built once per slide render and never mutated by the core.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideContext {
    pub theme: Option<Theme>,
    pub color_map: ColorMap,
    pub table_styles: TableStyleSheets,
    pub options: ResolveOptions,
}

impl SlideContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            color_map: ColorMap::master_default(),
            ..Default::default()
        }
    }

    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.color_map = color_map;
        self
    }

    pub fn with_table_styles(mut self, table_styles: TableStyleSheets) -> Self {
        self.table_styles = table_styles;
        self
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_default_map() {
        let map = ColorMap::master_default();
        assert_eq!(map.get("tx1"), Some("dk1"));
        assert_eq!(map.get("bg1"), Some("lt1"));
        assert_eq!(map.get("accent4"), Some("accent4"));
        assert_eq!(map.get("phClr"), None);
    }

    #[test]
    fn test_deserialize_context() {
        let ctx: SlideContext = serde_json::from_str(
            r##"{
                "theme": {"colorScheme": {"accent1": "#FF0000"}},
                "colorMap": {"tx1": "dk1"},
                "options": {"placeholderSlot": "accent2"}
            }"##,
        )
        .unwrap();
        assert_eq!(ctx.color_map.get("tx1"), Some("dk1"));
        assert_eq!(ctx.options.placeholder_slot, SchemeSlot::Accent2);
        assert!(ctx.theme.is_some());
    }
}
