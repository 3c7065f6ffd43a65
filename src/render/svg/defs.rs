//! Shared `<defs>` pool for gradients and effect filters.
//!
//! Ids come from one counter per pool (`grad-N`, `shdw-N`). The counter is
//! never reset, so ids stay unique for the life of the renderer even across
//! [`DefsPool::clear`].

use std::collections::HashMap;

use super::document::AttrWriter;
use crate::common::fmt::write_num_with_precision;
use crate::drawingml::color::parse_paint;
use crate::render::gradient::LinearGradient;
use crate::render::options::OuterShadow;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStopDef {
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

/// `<linearGradient>` in user space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradientDef {
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stops: Vec<GradientStopDef>,
}

/// Drop shadow `<filter>` with a user-space region.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowFilterDef {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub dx: f64,
    pub dy: f64,
    pub std_deviation: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    LinearGradient(LinearGradientDef),
    ShadowFilter(ShadowFilterDef),
}

/// Parameters identifying one logical shadow over one filter region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ShadowKey {
    color: String,
    blur_rad: u64,
    dist: u64,
    dir: u64,
    region: [u64; 4],
}

impl ShadowKey {
    fn new(shadow: &OuterShadow, region: (f64, f64, f64, f64)) -> Self {
        let (x, y, w, h) = region;
        Self {
            color: shadow.color.clone(),
            blur_rad: shadow.blur_rad.to_bits(),
            dist: shadow.dist.to_bits(),
            dir: shadow.dir.to_bits(),
            region: [x.to_bits(), y.to_bits(), w.to_bits(), h.to_bits()],
        }
    }
}

/// User-space region covering `bounds`, its offset copy and the blur spread.
///
/// Bounding-box relative regions collapse for horizontal and vertical lines,
/// whose boxes have no height or width.
fn shadow_region(bounds: (f64, f64, f64, f64), dx: f64, dy: f64, std_deviation: f64) -> (f64, f64, f64, f64) {
    let (x, y, w, h) = bounds;
    let pad = 3.0 * std_deviation.max(0.0);
    let x0 = x.min(x + dx) - pad;
    let y0 = y.min(y + dy) - pad;
    let x1 = (x + w).max(x + w + dx) + pad;
    let y1 = (y + h).max(y + h + dy) + pad;
    (x0, y0, x1 - x0, y1 - y0)
}

#[derive(Debug, Clone, Default)]
pub struct DefsPool {
    next_id: u64,
    definitions: Vec<Definition>,
    shadows: HashMap<ShadowKey, String>,
}

impl DefsPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Register a gradient spanning the box `(x, y, w, h)` and return its id.
    /// `None` when the gradient has no stops.
    pub fn add_linear_gradient(
        &mut self,
        gradient: &LinearGradient,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Option<String> {
        if gradient.stops.is_empty() {
            log::debug!("gradient fill without stops ignored");
            return None;
        }
        let ((x1, y1), (x2, y2)) = gradient.line(x, y, w, h);
        let stops = gradient
            .stops
            .iter()
            .map(|stop| GradientStopDef {
                offset: stop.position,
                color: stop.color.color.clone(),
                opacity: stop.color.alpha,
            })
            .collect();
        let id = self.allocate("grad");
        log::trace!("registered gradient {id}");
        self.definitions.push(Definition::LinearGradient(LinearGradientDef {
            id: id.clone(),
            x1,
            y1,
            x2,
            y2,
            stops,
        }));
        Some(id)
    }

    /// Id of the filter casting `shadow` from an element painted inside the
    /// user-space box `bounds`, registering it on first use.
    pub fn shadow_filter(&mut self, shadow: &OuterShadow, bounds: (f64, f64, f64, f64)) -> String {
        let (dx, dy) = shadow.offset();
        let std_deviation = shadow.blur_rad / 2.0;
        let region = shadow_region(bounds, dx, dy, std_deviation);
        let key = ShadowKey::new(shadow, region);
        if let Some(id) = self.shadows.get(&key) {
            return id.clone();
        }

        let (color, opacity) = match parse_paint(&shadow.color) {
            Some(rgba) => (rgba.rgb.to_css_hex(), rgba.alpha),
            None => {
                log::debug!("unreadable shadow color {:?}, using black", shadow.color);
                ("#000000".to_string(), 1.0)
            },
        };
        let id = self.allocate("shdw");
        log::trace!("registered shadow filter {id}");
        let (x, y, width, height) = region;
        self.definitions.push(Definition::ShadowFilter(ShadowFilterDef {
            id: id.clone(),
            x,
            y,
            width,
            height,
            dx,
            dy,
            std_deviation,
            color,
            opacity,
        }));
        self.shadows.insert(key, id.clone());
        id
    }

    /// Drop every definition; the id counter keeps counting.
    pub fn clear(&mut self) {
        self.definitions.clear();
        self.shadows.clear();
    }

    pub(crate) fn write(&self, buf: &mut String, precision: u32) {
        if self.definitions.is_empty() {
            return;
        }
        buf.push_str("<defs>\n");
        for def in &self.definitions {
            match def {
                Definition::LinearGradient(g) => {
                    buf.push_str("<linearGradient");
                    let mut w = AttrWriter { buf, precision };
                    w.str("id", &g.id);
                    w.str("gradientUnits", "userSpaceOnUse");
                    w.num("x1", g.x1);
                    w.num("y1", g.y1);
                    w.num("x2", g.x2);
                    w.num("y2", g.y2);
                    buf.push_str(">\n");
                    for stop in &g.stops {
                        buf.push_str("<stop offset=\"");
                        write_num_with_precision(buf, stop.offset, precision.max(4));
                        buf.push('"');
                        let mut w = AttrWriter { buf, precision };
                        w.str("stop-color", &stop.color);
                        if stop.opacity < 1.0 {
                            w.num("stop-opacity", stop.opacity);
                        }
                        buf.push_str("/>\n");
                    }
                    buf.push_str("</linearGradient>\n");
                },
                Definition::ShadowFilter(f) => {
                    buf.push_str("<filter");
                    let mut w = AttrWriter { buf, precision };
                    w.str("id", &f.id);
                    w.str("filterUnits", "userSpaceOnUse");
                    w.num("x", f.x);
                    w.num("y", f.y);
                    w.num("width", f.width);
                    w.num("height", f.height);
                    buf.push_str(">\n<feDropShadow");
                    let mut w = AttrWriter { buf, precision };
                    w.num("dx", f.dx);
                    w.num("dy", f.dy);
                    w.num("stdDeviation", f.std_deviation);
                    w.str("flood-color", &f.color);
                    if f.opacity < 1.0 {
                        w.num("flood-opacity", f.opacity);
                    }
                    buf.push_str("/>\n</filter>\n");
                },
            }
        }
        buf.push_str("</defs>\n");
    }
}
