//! Retained SVG element tree.

use smallvec::SmallVec;

use super::defs::DefsPool;
use crate::common::fmt::write_num_with_precision;
use crate::common::xml::write_xml_escaped;
use crate::render::matrix::Matrix;

/// Attribute writer bound to an output buffer and coordinate precision.
pub(crate) struct AttrWriter<'a> {
    pub(crate) buf: &'a mut String,
    pub(crate) precision: u32,
}

impl AttrWriter<'_> {
    pub(crate) fn num(&mut self, name: &str, value: f64) {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        write_num_with_precision(self.buf, value, self.precision);
        self.buf.push('"');
    }

    pub(crate) fn str(&mut self, name: &str, value: &str) {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        write_xml_escaped(self.buf, value);
        self.buf.push('"');
    }

    fn opt_str(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.str(name, value);
        }
    }

    fn url(&mut self, name: &str, id: &str) {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"url(#");
        write_xml_escaped(self.buf, id);
        self.buf.push_str(")\"");
    }
}

/// Presentation attributes shared by shape elements.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintAttrs {
    /// Color, or `None` for `fill="none"`.
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    /// Gradient definition id; wins over `fill`.
    pub fill_gradient: Option<String>,
    pub stroke: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub stroke_width: f64,
    pub stroke_dasharray: Option<SmallVec<[f64; 6]>>,
    pub stroke_linecap: Option<&'static str>,
    pub stroke_linejoin: Option<&'static str>,
    /// Filter definition id.
    pub filter: Option<String>,
}

impl Default for PaintAttrs {
    fn default() -> Self {
        Self {
            fill: None,
            fill_opacity: None,
            fill_gradient: None,
            stroke: None,
            stroke_opacity: None,
            stroke_width: 1.0,
            stroke_dasharray: None,
            stroke_linecap: None,
            stroke_linejoin: None,
            filter: None,
        }
    }
}

impl PaintAttrs {
    fn write(&self, w: &mut AttrWriter<'_>) {
        match (&self.fill_gradient, &self.fill) {
            (Some(id), _) => w.url("fill", id),
            (None, Some(fill)) => w.str("fill", fill),
            (None, None) => w.str("fill", "none"),
        }
        if let Some(opacity) = self.fill_opacity {
            w.num("fill-opacity", opacity);
        }
        if let Some(stroke) = &self.stroke {
            w.str("stroke", stroke);
            w.num("stroke-width", self.stroke_width);
            if let Some(opacity) = self.stroke_opacity {
                w.num("stroke-opacity", opacity);
            }
            if let Some(dashes) = &self.stroke_dasharray {
                w.buf.push_str(" stroke-dasharray=\"");
                for (i, d) in dashes.iter().enumerate() {
                    if i > 0 {
                        w.buf.push(' ');
                    }
                    write_num_with_precision(w.buf, *d, w.precision);
                }
                w.buf.push('"');
            }
            w.opt_str("stroke-linecap", self.stroke_linecap);
            w.opt_str("stroke-linejoin", self.stroke_linejoin);
        }
        if let Some(id) = &self.filter {
            w.url("filter", id);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub paint: PaintAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgEllipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub paint: PaintAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub paint: PaintAttrs,
}

/// Path element with pre-serialized path data.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub d: String,
    pub paint: PaintAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgText {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub font_family: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub anchor: &'static str,
    pub fill: String,
    pub fill_opacity: Option<f64>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgImage {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub href: String,
}

/// Transform scope opened by `set_transform`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgGroup {
    pub id: Option<String>,
    pub transform: Option<Matrix>,
    pub children: Vec<SvgElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    Group(SvgGroup),
    Rect(SvgRect),
    Ellipse(SvgEllipse),
    Line(SvgLine),
    Path(SvgPath),
    Text(SvgText),
    Image(SvgImage),
}

impl SvgElement {
    pub(crate) fn write(&self, buf: &mut String, precision: u32) {
        let mut w = AttrWriter { buf, precision };
        match self {
            Self::Group(group) => {
                w.buf.push_str("<g");
                if let Some(id) = &group.id {
                    w.str("id", id);
                }
                if let Some(matrix) = group.transform.filter(|m| !m.is_identity()) {
                    w.buf.push_str(" transform=\"");
                    matrix.write_svg(w.buf, precision);
                    w.buf.push('"');
                }
                if group.children.is_empty() {
                    w.buf.push_str("/>");
                    return;
                }
                w.buf.push_str(">\n");
                for child in &group.children {
                    child.write(w.buf, precision);
                    w.buf.push('\n');
                }
                w.buf.push_str("</g>");
            },
            Self::Rect(rect) => {
                w.buf.push_str("<rect");
                w.num("x", rect.x);
                w.num("y", rect.y);
                w.num("width", rect.width);
                w.num("height", rect.height);
                rect.paint.write(&mut w);
                w.buf.push_str("/>");
            },
            Self::Ellipse(ellipse) => {
                w.buf.push_str("<ellipse");
                w.num("cx", ellipse.cx);
                w.num("cy", ellipse.cy);
                w.num("rx", ellipse.rx);
                w.num("ry", ellipse.ry);
                ellipse.paint.write(&mut w);
                w.buf.push_str("/>");
            },
            Self::Line(line) => {
                w.buf.push_str("<line");
                w.num("x1", line.x1);
                w.num("y1", line.y1);
                w.num("x2", line.x2);
                w.num("y2", line.y2);
                line.paint.write(&mut w);
                w.buf.push_str("/>");
            },
            Self::Path(path) => {
                w.buf.push_str("<path");
                w.str("d", &path.d);
                path.paint.write(&mut w);
                w.buf.push_str("/>");
            },
            Self::Text(text) => {
                w.buf.push_str("<text");
                w.num("x", text.x);
                w.num("y", text.y);
                w.num("font-size", text.font_size);
                w.opt_str("font-family", text.font_family.as_deref());
                if text.bold {
                    w.str("font-weight", "bold");
                }
                if text.italic {
                    w.str("font-style", "italic");
                }
                if text.anchor != "start" {
                    w.str("text-anchor", text.anchor);
                }
                w.str("fill", &text.fill);
                if let Some(opacity) = text.fill_opacity {
                    w.num("fill-opacity", opacity);
                }
                if let Some(id) = &text.filter {
                    w.url("filter", id);
                }
                w.buf.push('>');
                write_xml_escaped(w.buf, &text.text);
                w.buf.push_str("</text>");
            },
            Self::Image(image) => {
                w.buf.push_str("<image");
                w.num("x", image.x);
                w.num("y", image.y);
                w.num("width", image.width);
                w.num("height", image.height);
                w.str("href", &image.href);
                w.buf.push_str("/>");
            },
        }
    }
}

/// A complete SVG document: root elements plus the definitions pool.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    pub width: f64,
    pub height: f64,
    pub defs: DefsPool,
    pub elements: Vec<SvgElement>,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            defs: DefsPool::new(),
            elements: Vec::new(),
        }
    }

    /// Serialize the document.
    pub fn write(&self, buf: &mut String, precision: u32, xml_declaration: bool) {
        if xml_declaration {
            buf.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            buf.push('\n');
        }
        buf.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        let mut w = AttrWriter { buf, precision };
        w.num("width", self.width);
        w.num("height", self.height);
        buf.push_str(" viewBox=\"0 0 ");
        write_num_with_precision(buf, self.width, precision);
        buf.push(' ');
        write_num_with_precision(buf, self.height, precision);
        buf.push_str("\">\n");

        self.defs.write(buf, precision);

        for element in &self.elements {
            element.write(buf, precision);
            buf.push('\n');
        }
        buf.push_str("</svg>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(element: &SvgElement) -> String {
        let mut buf = String::new();
        element.write(&mut buf, 2);
        buf
    }

    #[test]
    fn test_rect_defaults_to_no_fill() {
        let rect = SvgElement::Rect(SvgRect {
            x: 1.0,
            y: 2.0,
            width: 3.5,
            height: 4.0,
            paint: PaintAttrs::default(),
        });
        assert_eq!(render(&rect), r#"<rect x="1" y="2" width="3.5" height="4" fill="none"/>"#);
    }

    #[test]
    fn test_stroke_attributes() {
        let line = SvgElement::Line(SvgLine {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
            paint: PaintAttrs {
                stroke: Some("#000000".into()),
                stroke_width: 2.0,
                stroke_opacity: Some(0.5),
                stroke_dasharray: Some(SmallVec::from_slice(&[8.0, 6.0])),
                stroke_linecap: Some("round"),
                filter: Some("shdw-1".into()),
                ..Default::default()
            },
        });
        assert_eq!(
            render(&line),
            r##"<line x1="0" y1="0" x2="10" y2="0" fill="none" stroke="#000000" stroke-width="2" stroke-opacity="0.5" stroke-dasharray="8 6" stroke-linecap="round" filter="url(#shdw-1)"/>"##
        );
    }

    #[test]
    fn test_gradient_fill_reference() {
        let path = SvgElement::Path(SvgPath {
            d: "M 0 0 L 1 1".into(),
            paint: PaintAttrs {
                fill: Some("#FF0000".into()),
                fill_gradient: Some("grad-3".into()),
                ..Default::default()
            },
        });
        assert_eq!(render(&path), r#"<path d="M 0 0 L 1 1" fill="url(#grad-3)"/>"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let text = SvgElement::Text(SvgText {
            x: 0.0,
            y: 10.0,
            text: "a < b & c".into(),
            font_size: 12.0,
            font_family: Some("Calibri".into()),
            bold: true,
            italic: false,
            anchor: "middle",
            fill: "#000000".into(),
            fill_opacity: None,
            filter: None,
        });
        assert_eq!(
            render(&text),
            r##"<text x="0" y="10" font-size="12" font-family="Calibri" font-weight="bold" text-anchor="middle" fill="#000000">a &lt; b &amp; c</text>"##
        );
    }

    #[test]
    fn test_group_with_children() {
        let group = SvgElement::Group(SvgGroup {
            id: Some("shape-1".into()),
            transform: Some(Matrix::translate(5.0, 5.0)),
            children: vec![SvgElement::Image(SvgImage {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
                href: "a.png".into(),
            })],
        });
        assert_eq!(
            render(&group),
            "<g id=\"shape-1\" transform=\"translate(5 5)\">\n<image x=\"0\" y=\"0\" width=\"1\" height=\"1\" href=\"a.png\"/>\n</g>"
        );
    }

    #[test]
    fn test_document_without_declaration() {
        let doc = SvgDocument::new(100.0, 50.0);
        let mut buf = String::new();
        doc.write(&mut buf, 2, false);
        assert_eq!(
            buf,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\" viewBox=\"0 0 100 50\">\n</svg>"
        );
    }
}
