//! Table style resolution.
//!
//! [`TableStyleSheet`]s hold independent region fragments; [`resolve_cell_style`]
//! layers the fragments covering one cell by fixed precedence and resolves
//! their colors through the slide's theme.

pub mod resolve;
pub mod style;

pub use resolve::{
    CellBorders, CellCoord, CellStyle, CellStyleFragment, ResolvedBorder, ResolvedBorders,
    ResolvedTextStyle, applicable_regions, cascade_cell_style, resolve_cell_style,
    resolve_cell_style_in_context, resolve_table,
};
pub use style::{
    BorderLine, BorderSet, CellFill, RegionKind, TableProperties, TableStyleRegion,
    TableStyleSheet, TableStyleSheets, TextStyleFragment,
};
