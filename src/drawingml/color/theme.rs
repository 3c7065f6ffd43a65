//! Theme color and font schemes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One of the twelve canonical theme color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SchemeSlot {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
}

impl SchemeSlot {
    pub const ALL: [SchemeSlot; 12] = [
        Self::Dark1,
        Self::Light1,
        Self::Dark2,
        Self::Light2,
        Self::Accent1,
        Self::Accent2,
        Self::Accent3,
        Self::Accent4,
        Self::Accent5,
        Self::Accent6,
        Self::Hyperlink,
        Self::FollowedHyperlink,
    ];

    /// Parse either the OOXML element name (`dk1`, `hlink`) or the spelled-out
    /// name (`dark1`, `hyperlink`).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "dk1" | "dark1" => Self::Dark1,
            "lt1" | "light1" => Self::Light1,
            "dk2" | "dark2" => Self::Dark2,
            "lt2" | "light2" => Self::Light2,
            "accent1" => Self::Accent1,
            "accent2" => Self::Accent2,
            "accent3" => Self::Accent3,
            "accent4" => Self::Accent4,
            "accent5" => Self::Accent5,
            "accent6" => Self::Accent6,
            "hlink" | "hyperlink" => Self::Hyperlink,
            "folHlink" | "followedHyperlink" => Self::FollowedHyperlink,
            _ => return None,
        })
    }

    /// The OOXML element name of this slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark1 => "dk1",
            Self::Light1 => "lt1",
            Self::Dark2 => "dk2",
            Self::Light2 => "lt2",
            Self::Accent1 => "accent1",
            Self::Accent2 => "accent2",
            Self::Accent3 => "accent3",
            Self::Accent4 => "accent4",
            Self::Accent5 => "accent5",
            Self::Accent6 => "accent6",
            Self::Hyperlink => "hlink",
            Self::FollowedHyperlink => "folHlink",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for SchemeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown scheme slot: {s}"))
    }
}

impl TryFrom<String> for SchemeSlot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SchemeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme color scheme (`a:clrScheme`): one hex value per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct ColorScheme {
    slots: [Option<String>; 12],
}

impl ColorScheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style slot assignment.
    pub fn with(mut self, slot: SchemeSlot, hex: impl Into<String>) -> Self {
        self.set(slot, hex);
        self
    }

    pub fn set(&mut self, slot: SchemeSlot, hex: impl Into<String>) {
        self.slots[slot.index()] = Some(hex.into());
    }

    pub fn get(&self, slot: SchemeSlot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }

    /// Look up a slot by name; unknown names resolve to `None`.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        SchemeSlot::from_name(name).and_then(|slot| self.get(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SchemeSlot, &str)> {
        SchemeSlot::ALL
            .iter()
            .filter_map(|&slot| self.get(slot).map(|hex| (slot, hex)))
    }
}

impl From<BTreeMap<String, String>> for ColorScheme {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut scheme = Self::default();
        for (name, hex) in map {
            match SchemeSlot::from_name(&name) {
                Some(slot) => scheme.set(slot, hex),
                None => log::debug!("ignoring unknown color scheme slot '{name}'"),
            }
        }
        scheme
    }
}

/// Theme font scheme (`a:fontScheme`), Latin typefaces only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontScheme {
    /// Heading font
    pub major: Option<String>,
    /// Body font
    pub minor: Option<String>,
}

/// Theme information consumed during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// Theme name
    pub name: String,
    pub color_scheme: ColorScheme,
    pub font_scheme: FontScheme,
}

impl Theme {
    pub fn new(name: impl Into<String>, color_scheme: ColorScheme) -> Self {
        Self {
            name: name.into(),
            color_scheme,
            font_scheme: FontScheme::default(),
        }
    }

    pub fn with_fonts(mut self, major: impl Into<String>, minor: impl Into<String>) -> Self {
        self.font_scheme = FontScheme {
            major: Some(major.into()),
            minor: Some(minor.into()),
        };
        self
    }

    /// Resolve a theme font reference (`+mj-lt`, `+mn-lt`, `major`, `minor`)
    /// to a family name. Anything else is treated as a literal family.
    pub fn font_for<'a>(&'a self, reference: &'a str) -> Option<&'a str> {
        match reference {
            "+mj-lt" | "+mj-ea" | "+mj-cs" | "major" => self.font_scheme.major.as_deref(),
            "+mn-lt" | "+mn-ea" | "+mn-cs" | "minor" => self.font_scheme.minor.as_deref(),
            "" => None,
            other => Some(other),
        }
    }
}
