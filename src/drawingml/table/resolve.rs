//! Cell style cascade.
//!
//! A cell's style is an ordered fold of the regions that cover it. Later
//! layers override earlier ones field by field:
//!
//! 1. `wholeTbl`
//! 2. `band1H`/`band2H` when banded rows are on (header/footer rows excluded)
//! 3. `band1V`/`band2V` when banded columns are on (first/last columns excluded)
//! 4. `firstRow`, `lastRow`, `firstCol`, `lastCol`
//! 5. corner cells `nwCell`, `neCell`, `swCell`, `seCell`, each checked
//!    independently so a 1x1 table collects all four

use smallvec::SmallVec;

use super::style::{
    BorderLine, BorderSet, CellFill, RegionKind, TableProperties, TableStyleRegion,
    TableStyleSheet, TextStyleFragment,
};
use crate::drawingml::color::resolve_color;
use crate::drawingml::context::SlideContext;

/// Position of a cell in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
    pub num_rows: usize,
    pub num_cols: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize, num_rows: usize, num_cols: usize) -> Self {
        Self {
            row,
            col,
            num_rows,
            num_cols,
        }
    }

    #[inline]
    fn last_row(&self) -> usize {
        self.num_rows.saturating_sub(1)
    }

    #[inline]
    fn last_col(&self) -> usize {
        self.num_cols.saturating_sub(1)
    }
}

/// Rows and columns (inclusive) covered by one applied region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extent {
    top: usize,
    bottom: usize,
    left: usize,
    right: usize,
}

/// Borders after projection onto a single cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellBorders {
    pub left: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub top: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
    pub tl2br: Option<BorderLine>,
    pub tr2bl: Option<BorderLine>,
}

impl CellBorders {
    fn merge_from(&mut self, other: CellBorders) {
        let CellBorders {
            left,
            right,
            top,
            bottom,
            tl2br,
            tr2bl,
        } = other;
        override_with(&mut self.left, left);
        override_with(&mut self.right, right);
        override_with(&mut self.top, top);
        override_with(&mut self.bottom, bottom);
        override_with(&mut self.tl2br, tl2br);
        override_with(&mut self.tr2bl, tr2bl);
    }
}

#[inline]
fn override_with<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// The folded but still unresolved style of one cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyleFragment {
    pub fill: Option<CellFill>,
    pub borders: CellBorders,
    pub text: TextStyleFragment,
}

/// A border with its color resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBorder {
    pub width: f64,
    pub color: String,
    pub dash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBorders {
    pub left: Option<ResolvedBorder>,
    pub right: Option<ResolvedBorder>,
    pub top: Option<ResolvedBorder>,
    pub bottom: Option<ResolvedBorder>,
    pub tl2br: Option<ResolvedBorder>,
    pub tr2bl: Option<ResolvedBorder>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTextStyle {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<String>,
    pub font_family: Option<String>,
}

/// Final per-cell style consumed by table rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub fill: Option<String>,
    pub borders: ResolvedBorders,
    pub text_style: ResolvedTextStyle,
}

/// Regions that apply to a cell, in cascade order.
pub fn applicable_regions(coord: CellCoord, props: &TableProperties) -> SmallVec<[RegionKind; 8]> {
    let mut regions = SmallVec::new();
    regions.push(RegionKind::WholeTable);

    let is_first_row = props.first_row && coord.row == 0;
    let is_last_row = props.last_row && coord.row == coord.last_row();
    let is_first_col = props.first_col && coord.col == 0;
    let is_last_col = props.last_col && coord.col == coord.last_col();

    if props.band_row && !is_first_row && !is_last_row {
        let band = coord.row - usize::from(props.first_row);
        regions.push(if band % 2 == 0 {
            RegionKind::Band1Horizontal
        } else {
            RegionKind::Band2Horizontal
        });
    }

    if props.band_col && !is_first_col && !is_last_col {
        let band = coord.col - usize::from(props.first_col);
        regions.push(if band % 2 == 0 {
            RegionKind::Band1Vertical
        } else {
            RegionKind::Band2Vertical
        });
    }

    if is_first_row {
        regions.push(RegionKind::FirstRow);
    }
    if is_last_row {
        regions.push(RegionKind::LastRow);
    }
    if is_first_col {
        regions.push(RegionKind::FirstColumn);
    }
    if is_last_col {
        regions.push(RegionKind::LastColumn);
    }

    if is_first_row && is_first_col {
        regions.push(RegionKind::NorthWestCell);
    }
    if is_first_row && is_last_col {
        regions.push(RegionKind::NorthEastCell);
    }
    if is_last_row && is_first_col {
        regions.push(RegionKind::SouthWestCell);
    }
    if is_last_row && is_last_col {
        regions.push(RegionKind::SouthEastCell);
    }

    regions
}

fn region_extent(kind: RegionKind, coord: CellCoord) -> Extent {
    let (last_row, last_col) = (coord.last_row(), coord.last_col());
    let rows = |top, bottom| (top, bottom);
    let ((top, bottom), (left, right)) = match kind {
        RegionKind::WholeTable => (rows(0, last_row), (0, last_col)),
        RegionKind::Band1Horizontal | RegionKind::Band2Horizontal => {
            (rows(coord.row, coord.row), (0, last_col))
        },
        RegionKind::Band1Vertical | RegionKind::Band2Vertical => {
            (rows(0, last_row), (coord.col, coord.col))
        },
        RegionKind::FirstRow => (rows(0, 0), (0, last_col)),
        RegionKind::LastRow => (rows(last_row, last_row), (0, last_col)),
        RegionKind::FirstColumn => (rows(0, last_row), (0, 0)),
        RegionKind::LastColumn => (rows(0, last_row), (last_col, last_col)),
        RegionKind::NorthWestCell
        | RegionKind::NorthEastCell
        | RegionKind::SouthWestCell
        | RegionKind::SouthEastCell => (rows(coord.row, coord.row), (coord.col, coord.col)),
    };
    Extent {
        top,
        bottom,
        left,
        right,
    }
}

/// Outer edges on the region boundary, inside lines between its cells.
fn project_borders(set: &BorderSet, extent: Extent, coord: CellCoord) -> CellBorders {
    let pick = |on_boundary: bool, outer: &Option<BorderLine>, inner: &Option<BorderLine>| {
        if on_boundary {
            outer.clone()
        } else {
            inner.clone()
        }
    };
    CellBorders {
        top: pick(coord.row == extent.top, &set.top, &set.inside_h),
        bottom: pick(coord.row == extent.bottom, &set.bottom, &set.inside_h),
        left: pick(coord.col == extent.left, &set.left, &set.inside_v),
        right: pick(coord.col == extent.right, &set.right, &set.inside_v),
        tl2br: set.tl2br.clone(),
        tr2bl: set.tr2bl.clone(),
    }
}

fn apply_layer(acc: &mut CellStyleFragment, region: &TableStyleRegion, extent: Extent, coord: CellCoord) {
    if let Some(fill) = &region.fill {
        acc.fill = Some(fill.clone());
    }
    if let Some(borders) = &region.borders {
        acc.borders.merge_from(project_borders(borders, extent, coord));
    }
    if let Some(text) = &region.tc_tx_style {
        acc.text.merge_from(text);
    }
}

/// Fold the applicable regions of `sheet` for one cell, without resolving colors.
pub fn cascade_cell_style(
    coord: CellCoord,
    props: &TableProperties,
    sheet: &TableStyleSheet,
) -> CellStyleFragment {
    let mut acc = CellStyleFragment::default();
    if coord.row >= coord.num_rows || coord.col >= coord.num_cols {
        return acc;
    }
    for kind in applicable_regions(coord, props) {
        if let Some(region) = sheet.region(kind) {
            apply_layer(&mut acc, region, region_extent(kind, coord), coord);
        }
    }
    acc
}

/// Compute the effective fill, borders and text style of one cell.
pub fn resolve_cell_style(
    coord: CellCoord,
    props: &TableProperties,
    sheet: &TableStyleSheet,
    ctx: &SlideContext,
) -> CellStyle {
    let fragment = cascade_cell_style(coord, props, sheet);
    resolve_fragment(&fragment, ctx)
}

/// Resolve a cell against the sheet named by `props.style_id` in the slide's
/// table styles. `None` when no sheet matches.
pub fn resolve_cell_style_in_context(
    coord: CellCoord,
    props: &TableProperties,
    ctx: &SlideContext,
) -> Option<CellStyle> {
    let Some(sheet) = ctx.table_styles.get(props.style_id.as_deref()) else {
        log::debug!("table style {:?} not found", props.style_id);
        return None;
    };
    Some(resolve_cell_style(coord, props, sheet, ctx))
}

/// Resolve every cell of a `num_rows` x `num_cols` table, row-major.
pub fn resolve_table(
    num_rows: usize,
    num_cols: usize,
    props: &TableProperties,
    sheet: &TableStyleSheet,
    ctx: &SlideContext,
) -> Vec<Vec<CellStyle>> {
    (0..num_rows)
        .map(|row| {
            (0..num_cols)
                .map(|col| {
                    resolve_cell_style(CellCoord::new(row, col, num_rows, num_cols), props, sheet, ctx)
                })
                .collect()
        })
        .collect()
}

fn resolve_fragment(fragment: &CellStyleFragment, ctx: &SlideContext) -> CellStyle {
    let fill = match &fragment.fill {
        Some(CellFill::Solid(color)) => resolve_color(Some(color), ctx),
        Some(CellFill::None) | None => None,
    };

    let border = |line: &Option<BorderLine>| -> Option<ResolvedBorder> {
        let line = line.as_ref()?;
        let color = resolve_color(line.color.as_ref(), ctx)?;
        Some(ResolvedBorder {
            width: line.width.unwrap_or(1.0),
            color,
            dash: line.dash.clone(),
        })
    };
    let b = &fragment.borders;
    let borders = ResolvedBorders {
        left: border(&b.left),
        right: border(&b.right),
        top: border(&b.top),
        bottom: border(&b.bottom),
        tl2br: border(&b.tl2br),
        tr2bl: border(&b.tr2bl),
    };

    let text = &fragment.text;
    let font_family = text.font.as_deref().and_then(|font| match ctx.theme.as_ref() {
        Some(theme) => theme.font_for(font).map(str::to_string),
        None => Some(font.to_string()).filter(|f| !f.starts_with('+')),
    });
    let text_style = ResolvedTextStyle {
        bold: text.bold.unwrap_or(false),
        italic: text.italic.unwrap_or(false),
        color: resolve_color(text.color.as_ref(), ctx),
        font_family,
    };

    CellStyle {
        fill,
        borders,
        text_style,
    }
}
