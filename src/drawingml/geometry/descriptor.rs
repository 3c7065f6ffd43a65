use std::collections::HashMap;

use serde::Deserialize;

/// A point in a custom path's local coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A custom geometry drawing instruction (`a:path` children).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CustomCommand {
    MoveTo {
        pt: Point,
    },
    #[serde(rename = "lnTo")]
    LineTo {
        pt: Point,
    },
    CubicBezTo {
        pts: [Point; 3],
    },
    QuadBezTo {
        pts: [Point; 2],
    },
    /// Radii in path units, angles in 60000ths of a degree.
    ArcTo {
        #[serde(rename = "wR")]
        w_r: f64,
        #[serde(rename = "hR")]
        h_r: f64,
        #[serde(rename = "stAng")]
        st_ang: f64,
        #[serde(rename = "swAng")]
        sw_ang: f64,
    },
    Close,
}

/// A custom path with its own coordinate extent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomPath {
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
    #[serde(default)]
    pub commands: Vec<CustomCommand>,
}

impl CustomPath {
    pub fn new(w: f64, h: f64) -> Self {
        Self {
            w,
            h,
            commands: Vec::new(),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(CustomCommand::MoveTo { pt: Point::new(x, y) });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(CustomCommand::LineTo { pt: Point::new(x, y) });
        self
    }

    pub fn cubic_to(mut self, c1: Point, c2: Point, end: Point) -> Self {
        self.commands.push(CustomCommand::CubicBezTo { pts: [c1, c2, end] });
        self
    }

    pub fn quad_to(mut self, c: Point, end: Point) -> Self {
        self.commands.push(CustomCommand::QuadBezTo { pts: [c, end] });
        self
    }

    pub fn arc_to(mut self, w_r: f64, h_r: f64, st_ang: f64, sw_ang: f64) -> Self {
        self.commands.push(CustomCommand::ArcTo {
            w_r,
            h_r,
            st_ang,
            sw_ang,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(CustomCommand::Close);
        self
    }
}

/// Shape geometry as produced by the shape parser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GeometryDescriptor {
    /// `a:prstGeom`; adjustment values use the `a:gd` names (`adj`, `adj1`, ...).
    Preset {
        preset: String,
        #[serde(default)]
        adjustments: HashMap<String, f64>,
    },
    /// `a:custGeom` with a single path.
    Custom { path: CustomPath },
}

impl GeometryDescriptor {
    pub fn preset(name: impl Into<String>) -> Self {
        Self::Preset {
            preset: name.into(),
            adjustments: HashMap::new(),
        }
    }

    /// Set an adjustment value; no effect on custom geometry.
    pub fn with_adjustment(mut self, name: impl Into<String>, value: f64) -> Self {
        if let Self::Preset { adjustments, .. } = &mut self {
            adjustments.insert(name.into(), value);
        }
        self
    }

    pub fn custom(path: CustomPath) -> Self {
        Self::Custom { path }
    }
}

/// Target box of a shape in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            flip_h: false,
            flip_v: false,
        }
    }

    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn with_flip(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }

    /// Build from EMU offsets and extents (`a:off` / `a:ext`).
    pub fn from_emu(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        use crate::common::unit::emu_to_px_f64;
        Self::new(
            emu_to_px_f64(x as f64),
            emu_to_px_f64(y as f64),
            emu_to_px_f64(cx as f64),
            emu_to_px_f64(cy as f64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_custom() {
        let json = r#"{
            "type": "custom",
            "path": {
                "w": 200, "h": 100,
                "commands": [
                    {"type": "moveTo", "pt": {"x": 10, "y": 10}},
                    {"type": "lnTo", "pt": {"x": 190, "y": 10}},
                    {"type": "arcTo", "wR": 5, "hR": 5, "stAng": 0, "swAng": 5400000},
                    {"type": "close"}
                ]
            }
        }"#;
        let desc: GeometryDescriptor = serde_json::from_str(json).unwrap();
        let expected = CustomPath::new(200.0, 100.0)
            .move_to(10.0, 10.0)
            .line_to(190.0, 10.0)
            .arc_to(5.0, 5.0, 0.0, 5_400_000.0)
            .close();
        assert_eq!(desc, GeometryDescriptor::custom(expected));
    }

    #[test]
    fn test_deserialize_preset() {
        let json = r#"{"type": "preset", "preset": "chevron", "adjustments": {"adj": 30000}}"#;
        let desc: GeometryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc, GeometryDescriptor::preset("chevron").with_adjustment("adj", 30000.0));

        let bare: GeometryDescriptor = serde_json::from_str(r#"{"type": "preset", "preset": "rect"}"#).unwrap();
        assert_eq!(bare, GeometryDescriptor::preset("rect"));
    }

    #[test]
    fn test_bounding_box() {
        let bbox: BoundingBox = serde_json::from_str(r#"{"width": 10, "height": 5, "flipH": true}"#).unwrap();
        assert_eq!(bbox, BoundingBox::sized(10.0, 5.0).with_flip(true, false));

        let emu = BoundingBox::from_emu(914_400, 0, 9525 * 100, 9525 * 50);
        assert_eq!(emu, BoundingBox::new(96.0, 0.0, 100.0, 50.0));
    }
}
