use serde::Deserialize;

use super::defs::DefsPool;
use super::document::{
    PaintAttrs, SvgDocument, SvgElement, SvgEllipse, SvgGroup, SvgImage, SvgLine, SvgPath, SvgRect,
    SvgText,
};
use crate::common::fmt::DEFAULT_PRECISION;
use crate::drawingml::color::parse_paint;
use crate::drawingml::geometry::PathData;
use crate::render::Renderer;
use crate::render::compound::decompose;
use crate::render::dash::dash_array;
use crate::render::matrix::Matrix;
use crate::render::options::{DrawOptions, Fill, Stroke, TextAnchor, TextOptions};

/// Vector backend configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    pub xml_declaration: bool,
    /// Decimal places kept for coordinates.
    pub precision: u32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
            xml_declaration: true,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SvgOptions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

/// Retained-mode renderer that builds an SVG document.
///
/// Every [`Renderer::set_transform`] opens a new `<g>` that receives the
/// primitives drawn after it. Gradients and shadow filters live in one
/// `<defs>` pool; a shadow with the same parameters is defined once and
/// referenced by id.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    options: SvgOptions,
    document: SvgDocument,
    /// Index into `document.elements` of the open transform group.
    scope: Option<usize>,
}

impl SvgRenderer {
    pub fn new(options: SvgOptions) -> Self {
        let document = SvgDocument::new(options.width, options.height);
        Self {
            options,
            document,
            scope: None,
        }
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn defs(&self) -> &DefsPool {
        &self.document.defs
    }

    /// Serialize the document drawn so far.
    pub fn to_svg_string(&self) -> String {
        let mut buf = String::with_capacity(1024);
        self.document
            .write(&mut buf, self.options.precision, self.options.xml_declaration);
        buf
    }

    fn push(&mut self, element: SvgElement) {
        if let Some(SvgElement::Group(group)) = self.scope.and_then(|i| self.document.elements.get_mut(i)) {
            group.children.push(element);
        } else {
            self.document.elements.push(element);
        }
    }

    /// Fill, stroke and filter attributes; `bounds` places gradients.
    fn paint(&mut self, options: &DrawOptions, bounds: (f64, f64, f64, f64)) -> PaintAttrs {
        let mut attrs = PaintAttrs::default();

        match &options.fill {
            Some(Fill::Solid(paint)) => match parse_paint(paint) {
                Some(rgba) if !rgba.is_transparent() => {
                    attrs.fill = Some(rgba.rgb.to_css_hex());
                    attrs.fill_opacity = (rgba.alpha < 1.0).then_some(rgba.alpha);
                },
                Some(_) => {},
                None => log::debug!("unreadable fill {paint:?}, leaving shape unfilled"),
            },
            Some(Fill::Gradient(gradient)) => {
                let (x, y, w, h) = bounds;
                attrs.fill_gradient = self.document.defs.add_linear_gradient(gradient, x, y, w, h);
            },
            None => {},
        }

        if let Some(stroke) = &options.stroke {
            self.apply_stroke(&mut attrs, stroke, stroke.width);
        }

        if let Some(shadow) = options.shadow() {
            let margin = options.stroke.as_ref().map_or(0.0, |s| s.width.max(0.0));
            let region = inflate(bounds, margin);
            attrs.filter = Some(self.document.defs.shadow_filter(shadow, region));
        }
        attrs
    }

    fn apply_stroke(&self, attrs: &mut PaintAttrs, stroke: &Stroke, width: f64) {
        if !(width > 0.0) {
            return;
        }
        let Some(rgba) = parse_paint(&stroke.color) else {
            log::debug!("unreadable stroke color {:?}", stroke.color);
            return;
        };
        attrs.stroke = Some(rgba.rgb.to_css_hex());
        attrs.stroke_opacity = (rgba.alpha < 1.0).then_some(rgba.alpha);
        attrs.stroke_width = width;
        // Dash lengths follow the full line width, also for compound sub-strokes
        attrs.stroke_dasharray = stroke.dash.as_deref().and_then(|d| dash_array(d, stroke.width));
        attrs.stroke_linecap = stroke.cap.map(|c| c.as_svg());
        attrs.stroke_linejoin = stroke.join.map(|j| j.as_svg());
    }
}

/// Grow `(x, y, w, h)` by `margin` on every side.
fn inflate(bounds: (f64, f64, f64, f64), margin: f64) -> (f64, f64, f64, f64) {
    let (x, y, w, h) = bounds;
    (x - margin, y - margin, w + 2.0 * margin, h + 2.0 * margin)
}

/// Generous box around a text run: one em per character, one em above the
/// baseline and half an em below it.
fn text_bounds(content: &str, x: f64, y: f64, options: &TextOptions) -> (f64, f64, f64, f64) {
    let size = options.font_size.max(0.0);
    let width = content.chars().count() as f64 * size;
    let left = match options.anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - width / 2.0,
        TextAnchor::End => x - width,
    };
    (left, y - size, width, size * 1.5)
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(SvgOptions::default())
    }
}

impl Renderer for SvgRenderer {
    fn clear(&mut self) {
        self.document.elements.clear();
        self.document.defs.clear();
        self.scope = None;
    }

    fn set_transform(&mut self, matrix: Matrix, group_id: Option<&str>) {
        log::trace!("svg: new transform scope {group_id:?}");
        self.document.elements.push(SvgElement::Group(SvgGroup {
            id: group_id.map(str::to_string),
            transform: Some(matrix),
            children: Vec::new(),
        }));
        self.scope = Some(self.document.elements.len() - 1);
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, options: &DrawOptions) {
        let paint = self.paint(options, (x, y, width, height));
        self.push(SvgElement::Rect(SvgRect {
            x,
            y,
            width,
            height,
            paint,
        }));
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, options: &DrawOptions) {
        let paint = self.paint(options, (cx - rx, cy - ry, rx * 2.0, ry * 2.0));
        self.push(SvgElement::Ellipse(SvgEllipse { cx, cy, rx, ry, paint }));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &DrawOptions) {
        let Some(stroke) = &options.stroke else {
            return;
        };
        let strokes = decompose(x1, y1, x2, y2, stroke.width, stroke.cmpd.unwrap_or_default());
        if strokes.is_empty() {
            return;
        }
        let bounds = (x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs());
        let region = inflate(bounds, stroke.width);
        let filter = options
            .shadow()
            .map(|shadow| self.document.defs.shadow_filter(shadow, region));
        for sub in strokes {
            let mut paint = PaintAttrs {
                filter: filter.clone(),
                ..Default::default()
            };
            self.apply_stroke(&mut paint, stroke, sub.width);
            self.push(SvgElement::Line(SvgLine {
                x1: sub.x1,
                y1: sub.y1,
                x2: sub.x2,
                y2: sub.y2,
                paint,
            }));
        }
    }

    fn draw_path(&mut self, path: &PathData, options: &DrawOptions) {
        if path.is_empty() {
            return;
        }
        let bounds = path
            .control_bounds()
            .map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0, y1 - y0))
            .unwrap_or_default();
        let paint = self.paint(options, bounds);
        let d = path.to_svg_string_with_precision(self.options.precision);
        self.push(SvgElement::Path(SvgPath { d, paint }));
    }

    fn draw_text(&mut self, content: &str, x: f64, y: f64, options: &TextOptions) {
        if content.is_empty() {
            return;
        }
        let rgba = options.color.as_deref().and_then(parse_paint);
        let (fill, fill_opacity) = match rgba {
            Some(rgba) => (rgba.rgb.to_css_hex(), (rgba.alpha < 1.0).then_some(rgba.alpha)),
            None => ("#000000".to_string(), None),
        };
        let filter = options
            .shadow()
            .map(|shadow| self.document.defs.shadow_filter(shadow, text_bounds(content, x, y, options)));
        self.push(SvgElement::Text(SvgText {
            x,
            y,
            text: content.to_string(),
            font_size: options.font_size,
            font_family: options.font_family.clone(),
            bold: options.bold,
            italic: options.italic,
            anchor: options.anchor.as_svg(),
            fill,
            fill_opacity,
            filter,
        }));
    }

    fn draw_image(&mut self, href: &str, x: f64, y: f64, width: f64, height: f64) {
        if href.is_empty() || !(width > 0.0 && height > 0.0) {
            log::debug!("svg: skipping image with empty href or extent");
            return;
        }
        self.push(SvgElement::Image(SvgImage {
            x,
            y,
            width,
            height,
            href: href.to_string(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawingml::color::ColorAlpha;
    use crate::drawingml::geometry::{BoundingBox, GeometryDescriptor, compile};
    use crate::render::gradient::{GradientStop, LinearGradient};
    use crate::render::options::{CompoundLine, OuterShadow};
    use crate::render::svg::defs::Definition;

    fn renderer() -> SvgRenderer {
        SvgRenderer::new(SvgOptions::new(200.0, 100.0).with_xml_declaration(false))
    }

    fn lines(r: &SvgRenderer) -> Vec<SvgLine> {
        fn collect(elements: &[SvgElement], out: &mut Vec<SvgLine>) {
            for e in elements {
                match e {
                    SvgElement::Line(l) => out.push(l.clone()),
                    SvgElement::Group(g) => collect(&g.children, out),
                    _ => {},
                }
            }
        }
        let mut out = Vec::new();
        collect(&r.document().elements, &mut out);
        out
    }

    #[test]
    fn test_rect_with_rgba_fill() {
        let mut r = renderer();
        r.draw_rect(0.0, 0.0, 10.0, 20.0, &DrawOptions::new().with_fill("rgba(255, 0, 0, 0.5)"));
        assert_eq!(
            r.to_svg_string(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"100\" viewBox=\"0 0 200 100\">\n\
             <rect x=\"0\" y=\"0\" width=\"10\" height=\"20\" fill=\"#FF0000\" fill-opacity=\"0.5\"/>\n\
             </svg>"
        );
    }

    #[test]
    fn test_set_transform_opens_groups() {
        let mut r = renderer();
        r.draw_rect(0.0, 0.0, 1.0, 1.0, &DrawOptions::new());
        r.set_transform(Matrix::translate(10.0, 10.0), Some("shape-1"));
        r.draw_rect(0.0, 0.0, 1.0, 1.0, &DrawOptions::new());
        r.draw_ellipse(0.0, 0.0, 1.0, 1.0, &DrawOptions::new());
        r.set_transform(Matrix::IDENTITY, None);
        r.draw_rect(0.0, 0.0, 1.0, 1.0, &DrawOptions::new());

        let elements = &r.document().elements;
        assert_eq!(elements.len(), 3);
        assert!(matches!(elements[0], SvgElement::Rect(_)));
        let SvgElement::Group(first) = &elements[1] else {
            panic!("expected a group");
        };
        assert_eq!(first.id.as_deref(), Some("shape-1"));
        assert_eq!(first.children.len(), 2);
        let SvgElement::Group(second) = &elements[2] else {
            panic!("expected a group");
        };
        assert_eq!(second.children.len(), 1);
    }

    #[test]
    fn test_double_line_splits() {
        let mut r = renderer();
        let stroke = Stroke::new("#000000", 8.0).with_compound(CompoundLine::Double);
        r.draw_line(0.0, 0.0, 10.0, 0.0, &DrawOptions::new().with_stroke(stroke));
        let lines = lines(&r);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].paint.stroke_width, 3.0);
        assert_eq!(lines[0].y1, -2.5);
        assert_eq!(lines[1].y1, 2.5);
    }

    #[test]
    fn test_degenerate_lines_draw_nothing() {
        let mut r = renderer();
        r.draw_line(5.0, 5.0, 5.0, 5.0, &DrawOptions::new().with_stroke(Stroke::new("#000000", 2.0)));
        r.draw_line(0.0, 0.0, 5.0, 5.0, &DrawOptions::new().with_stroke(Stroke::new("#000000", 0.0)));
        r.draw_line(0.0, 0.0, 5.0, 5.0, &DrawOptions::new());
        assert!(r.document().elements.is_empty());
    }

    #[test]
    fn test_shadow_defined_once() {
        let mut r = renderer();
        let opts = DrawOptions::new()
            .with_fill("#00FF00")
            .with_shadow(OuterShadow::new("rgba(0, 0, 0, 0.4)", 6.0, 4.0, 45.0));
        r.draw_rect(0.0, 0.0, 10.0, 10.0, &opts);
        r.draw_ellipse(5.0, 5.0, 5.0, 5.0, &opts);
        assert_eq!(r.defs().definitions().len(), 1);

        let svg = r.to_svg_string();
        assert_eq!(svg.matches("<filter ").count(), 1);
        assert_eq!(svg.matches("filter=\"url(#shdw-1)\"").count(), 2);
    }

    #[test]
    fn test_shadowed_flat_line_filter_in_user_space() {
        let mut r = renderer();
        let opts = DrawOptions::new()
            .with_stroke(Stroke::new("#000000", 2.0))
            .with_shadow(OuterShadow::new("#000000", 4.0, 3.0, 90.0));
        r.draw_line(10.0, 50.0, 90.0, 50.0, &opts);

        let Some(Definition::ShadowFilter(filter)) = r.defs().definitions().first() else {
            panic!("expected a shadow filter");
        };
        assert!(filter.width > 80.0);
        assert!(filter.height > 0.0);
        assert!(filter.y < 49.0 && filter.y + filter.height > 53.0);

        let svg = r.to_svg_string();
        assert!(svg.contains("<filter id=\"shdw-1\" filterUnits=\"userSpaceOnUse\""));
        assert!(svg.contains("filter=\"url(#shdw-1)\""));
    }

    #[test]
    fn test_compound_line_shares_one_filter() {
        let mut r = renderer();
        let opts = DrawOptions::new()
            .with_stroke(Stroke::new("#000000", 8.0).with_compound(CompoundLine::Triple))
            .with_shadow(OuterShadow::new("#000000", 2.0, 2.0, 0.0));
        r.draw_line(0.0, 20.0, 100.0, 20.0, &opts);
        assert_eq!(lines(&r).len(), 3);
        assert_eq!(r.defs().definitions().len(), 1);
        assert!(lines(&r).iter().all(|l| l.paint.filter.as_deref() == Some("shdw-1")));
    }

    #[test]
    fn test_gradient_and_clear() {
        let mut r = renderer();
        let gradient = LinearGradient::new(
            90.0,
            vec![
                GradientStop::new(0.0, ColorAlpha::opaque("#FF0000")),
                GradientStop::new(1.0, ColorAlpha::opaque("#0000FF")),
            ],
        );
        r.draw_rect(0.0, 0.0, 10.0, 10.0, &DrawOptions::new().with_gradient(gradient.clone()));
        assert!(r.to_svg_string().contains("fill=\"url(#grad-1)\""));

        r.clear();
        assert!(r.document().elements.is_empty());
        assert!(r.defs().is_empty());

        r.draw_rect(0.0, 0.0, 10.0, 10.0, &DrawOptions::new().with_gradient(gradient));
        assert!(r.to_svg_string().contains("fill=\"url(#grad-2)\""));
    }

    #[test]
    fn test_draw_compiled_path() {
        let mut r = renderer();
        let path = compile(Some(&GeometryDescriptor::preset("rect")), &BoundingBox::sized(10.0, 5.0)).unwrap();
        r.draw_path(&path, &DrawOptions::new().with_stroke(Stroke::new("#112233", 1.5).with_dash("dash")));
        let svg = r.to_svg_string();
        assert!(svg.contains(
            "<path d=\"M 0 0 L 10 0 L 10 5 L 0 5 Z\" fill=\"none\" stroke=\"#112233\" stroke-width=\"1.5\" stroke-dasharray=\"6 4.5\"/>"
        ));

        r.draw_path(&PathData::new(), &DrawOptions::new().with_fill("#000000"));
        assert_eq!(r.document().elements.len(), 1);
    }

    #[test]
    fn test_text_and_image() {
        let mut r = renderer();
        r.draw_text(
            "Q&A",
            5.0,
            20.0,
            &TextOptions::new(14.0)
                .with_color("#333333")
                .with_font("Calibri")
                .with_anchor(TextAnchor::Middle),
        );
        r.draw_image("data:image/png;base64,AAAA", 0.0, 0.0, 4.0, 4.0);
        r.draw_image("", 0.0, 0.0, 4.0, 4.0);
        let svg = r.to_svg_string();
        assert!(svg.contains(
            "<text x=\"5\" y=\"20\" font-size=\"14\" font-family=\"Calibri\" text-anchor=\"middle\" fill=\"#333333\">Q&amp;A</text>"
        ));
        assert_eq!(svg.matches("<image").count(), 1);
    }

    #[test]
    fn test_declaration_toggle() {
        let r = SvgRenderer::new(SvgOptions::new(1.0, 1.0));
        assert!(r.to_svg_string().starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg"));
    }
}
