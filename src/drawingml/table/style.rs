//! Table style sheets (`a:tblStyle`) as independent style fragments.
//!
//! Regions never reference each other; they are only combined when a cell's
//! style is resolved.

use serde::Deserialize;

use crate::drawingml::color::ColorDescriptor;

/// Cell fill carried by a style region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellFill {
    /// Explicit `a:noFill`; clears any fill from lower layers
    None,
    /// `a:solidFill`
    Solid(ColorDescriptor),
}

/// One border line (`a:ln`). A line without a color draws nothing but still
/// overrides lower layers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderLine {
    /// Width in pixels
    pub width: Option<f64>,
    pub color: Option<ColorDescriptor>,
    /// Preset dash name (`dash`, `sysDot`, ...)
    pub dash: Option<String>,
}

impl BorderLine {
    pub fn solid(width: f64, color: ColorDescriptor) -> Self {
        Self {
            width: Some(width),
            color: Some(color),
            dash: None,
        }
    }
}

/// Borders of a region (`a:tcBdr`). Outer edges apply on the region boundary,
/// `insideH`/`insideV` on the edges between its cells.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderSet {
    pub left: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub top: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
    #[serde(rename = "insideH")]
    pub inside_h: Option<BorderLine>,
    #[serde(rename = "insideV")]
    pub inside_v: Option<BorderLine>,
    #[serde(rename = "tl2br")]
    pub tl2br: Option<BorderLine>,
    #[serde(rename = "tr2bl")]
    pub tr2bl: Option<BorderLine>,
}

/// Text properties of a region (`a:tcTxStyle`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyleFragment {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<ColorDescriptor>,
    /// Theme font reference (`+mn-lt`) or literal family
    pub font: Option<String>,
}

impl TextStyleFragment {
    /// Field-by-field override: present fields of `other` win.
    pub fn merge_from(&mut self, other: &TextStyleFragment) {
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.italic.is_some() {
            self.italic = other.italic;
        }
        if other.color.is_some() {
            self.color.clone_from(&other.color);
        }
        if other.font.is_some() {
            self.font.clone_from(&other.font);
        }
    }
}

/// One named region of a table style.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyleRegion {
    pub tc_tx_style: Option<TextStyleFragment>,
    pub fill: Option<CellFill>,
    pub borders: Option<BorderSet>,
}

impl TableStyleRegion {
    pub fn with_fill(mut self, color: ColorDescriptor) -> Self {
        self.fill = Some(CellFill::Solid(color));
        self
    }

    pub fn with_text(mut self, text: TextStyleFragment) -> Self {
        self.tc_tx_style = Some(text);
        self
    }

    pub fn with_borders(mut self, borders: BorderSet) -> Self {
        self.borders = Some(borders);
        self
    }
}

/// Region names in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    WholeTable,
    Band1Horizontal,
    Band2Horizontal,
    Band1Vertical,
    Band2Vertical,
    FirstRow,
    LastRow,
    FirstColumn,
    LastColumn,
    NorthWestCell,
    NorthEastCell,
    SouthWestCell,
    SouthEastCell,
}

impl RegionKind {
    /// The OOXML element name of the region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WholeTable => "wholeTbl",
            Self::Band1Horizontal => "band1H",
            Self::Band2Horizontal => "band2H",
            Self::Band1Vertical => "band1V",
            Self::Band2Vertical => "band2V",
            Self::FirstRow => "firstRow",
            Self::LastRow => "lastRow",
            Self::FirstColumn => "firstCol",
            Self::LastColumn => "lastCol",
            Self::NorthWestCell => "nwCell",
            Self::NorthEastCell => "neCell",
            Self::SouthWestCell => "swCell",
            Self::SouthEastCell => "seCell",
        }
    }
}

/// A complete table style (`a:tblStyle`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyleSheet {
    /// Style GUID (`styleId`)
    pub id: String,
    pub name: String,
    pub whole_tbl: Option<TableStyleRegion>,
    #[serde(rename = "band1H")]
    pub band1_h: Option<TableStyleRegion>,
    #[serde(rename = "band2H")]
    pub band2_h: Option<TableStyleRegion>,
    #[serde(rename = "band1V")]
    pub band1_v: Option<TableStyleRegion>,
    #[serde(rename = "band2V")]
    pub band2_v: Option<TableStyleRegion>,
    pub first_row: Option<TableStyleRegion>,
    pub last_row: Option<TableStyleRegion>,
    pub first_col: Option<TableStyleRegion>,
    pub last_col: Option<TableStyleRegion>,
    pub nw_cell: Option<TableStyleRegion>,
    pub ne_cell: Option<TableStyleRegion>,
    pub sw_cell: Option<TableStyleRegion>,
    pub se_cell: Option<TableStyleRegion>,
}

impl TableStyleSheet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn region(&self, kind: RegionKind) -> Option<&TableStyleRegion> {
        match kind {
            RegionKind::WholeTable => self.whole_tbl.as_ref(),
            RegionKind::Band1Horizontal => self.band1_h.as_ref(),
            RegionKind::Band2Horizontal => self.band2_h.as_ref(),
            RegionKind::Band1Vertical => self.band1_v.as_ref(),
            RegionKind::Band2Vertical => self.band2_v.as_ref(),
            RegionKind::FirstRow => self.first_row.as_ref(),
            RegionKind::LastRow => self.last_row.as_ref(),
            RegionKind::FirstColumn => self.first_col.as_ref(),
            RegionKind::LastColumn => self.last_col.as_ref(),
            RegionKind::NorthWestCell => self.nw_cell.as_ref(),
            RegionKind::NorthEastCell => self.ne_cell.as_ref(),
            RegionKind::SouthWestCell => self.sw_cell.as_ref(),
            RegionKind::SouthEastCell => self.se_cell.as_ref(),
        }
    }

    pub fn with_region(mut self, kind: RegionKind, region: TableStyleRegion) -> Self {
        let slot = match kind {
            RegionKind::WholeTable => &mut self.whole_tbl,
            RegionKind::Band1Horizontal => &mut self.band1_h,
            RegionKind::Band2Horizontal => &mut self.band2_h,
            RegionKind::Band1Vertical => &mut self.band1_v,
            RegionKind::Band2Vertical => &mut self.band2_v,
            RegionKind::FirstRow => &mut self.first_row,
            RegionKind::LastRow => &mut self.last_row,
            RegionKind::FirstColumn => &mut self.first_col,
            RegionKind::LastColumn => &mut self.last_col,
            RegionKind::NorthWestCell => &mut self.nw_cell,
            RegionKind::NorthEastCell => &mut self.ne_cell,
            RegionKind::SouthWestCell => &mut self.sw_cell,
            RegionKind::SouthEastCell => &mut self.se_cell,
        };
        *slot = Some(region);
        self
    }
}

/// The table style part (`tableStyles.xml`): all sheets plus the default id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyleSheets {
    pub default_id: Option<String>,
    pub styles: Vec<TableStyleSheet>,
}

impl TableStyleSheets {
    pub fn push(&mut self, sheet: TableStyleSheet) {
        self.styles.push(sheet);
    }

    /// Find a sheet by id, falling back to the part's default style.
    pub fn get(&self, id: Option<&str>) -> Option<&TableStyleSheet> {
        let find = |wanted: &str| self.styles.iter().find(|s| s.id == wanted);
        id.and_then(find)
            .or_else(|| self.default_id.as_deref().and_then(find))
    }
}

/// Table-level flags (`a:tblPr`) selecting which special regions apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableProperties {
    pub first_row: bool,
    pub last_row: bool,
    pub first_col: bool,
    pub last_col: bool,
    pub band_row: bool,
    pub band_col: bool,
    /// Referenced table style id
    pub style_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fragment_merge() {
        let mut base = TextStyleFragment {
            bold: Some(false),
            italic: Some(true),
            color: Some(ColorDescriptor::scheme("dk1")),
            font: None,
        };
        base.merge_from(&TextStyleFragment {
            bold: Some(true),
            ..Default::default()
        });
        assert_eq!(base.bold, Some(true));
        assert_eq!(base.italic, Some(true));
        assert_eq!(base.color, Some(ColorDescriptor::scheme("dk1")));
    }

    #[test]
    fn test_deserialize_sheet() {
        let sheets: TableStyleSheets = serde_json::from_str(
            r#"{
                "defaultId": "{5C22544A}",
                "styles": [{
                    "id": "{5C22544A}",
                    "name": "Medium Style 2 - Accent 1",
                    "wholeTbl": {"fill": {"solid": {"scheme": "accent1", "tint": 20000}}},
                    "band1H": {"fill": {"solid": {"scheme": "accent1", "tint": 40000}}},
                    "firstRow": {
                        "fill": "none",
                        "tcTxStyle": {"bold": true, "color": {"scheme": "lt1"}},
                        "borders": {"bottom": {"width": 3, "color": {"scheme": "lt1"}}, "insideV": {"width": 1}}
                    }
                }]
            }"#,
        )
        .unwrap();
        let sheet = sheets.get(Some("{unknown}")).unwrap();
        assert_eq!(sheet.name, "Medium Style 2 - Accent 1");
        assert!(sheet.band1_h.is_some());
        assert!(sheet.band2_h.is_none());
        let first = sheet.region(RegionKind::FirstRow).unwrap();
        assert_eq!(first.fill, Some(CellFill::None));
        assert_eq!(first.tc_tx_style.as_ref().unwrap().bold, Some(true));
        let borders = first.borders.as_ref().unwrap();
        assert_eq!(borders.bottom.as_ref().unwrap().width, Some(3.0));
        assert_eq!(borders.inside_v.as_ref().unwrap().color, None);
    }

    #[test]
    fn test_sheets_lookup_without_default() {
        let mut sheets = TableStyleSheets::default();
        sheets.push(TableStyleSheet::new("a", "A"));
        assert!(sheets.get(Some("a")).is_some());
        assert!(sheets.get(Some("b")).is_none());
        assert!(sheets.get(None).is_none());
    }
}
