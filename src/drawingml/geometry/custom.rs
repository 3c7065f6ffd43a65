//! Custom geometry (`a:custGeom`) compilation.

use super::descriptor::{BoundingBox, CustomCommand, CustomPath};
use super::path::{PathBuilder, PathData};
use crate::common::unit::angle_to_degrees;

/// Scale a custom path onto the target box, one output command per input
/// command and in the same order.
///
/// A zero path extent on an axis leaves that axis unscaled.
pub fn compile_custom(path: &CustomPath, bbox: &BoundingBox) -> Option<PathData> {
    if path.commands.is_empty() {
        return None;
    }
    let scale_x = if path.w == 0.0 { 1.0 } else { bbox.width / path.w };
    let scale_y = if path.h == 0.0 { 1.0 } else { bbox.height / path.h };

    let mut builder = PathBuilder::scaled(scale_x, scale_y);
    for cmd in &path.commands {
        match cmd {
            CustomCommand::MoveTo { pt } => builder.move_to(pt.x, pt.y),
            CustomCommand::LineTo { pt } => builder.line_to(pt.x, pt.y),
            CustomCommand::CubicBezTo { pts: [c1, c2, end] } => {
                builder.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y)
            },
            CustomCommand::QuadBezTo { pts: [c, end] } => builder.quad_to(c.x, c.y, end.x, end.y),
            CustomCommand::ArcTo {
                w_r,
                h_r,
                st_ang,
                sw_ang,
            } => builder.arc_to(*w_r, *h_r, angle_to_degrees(*st_ang), angle_to_degrees(*sw_ang)),
            CustomCommand::Close => builder.close(),
        };
    }
    Some(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawingml::geometry::PathCommand;
    use crate::drawingml::geometry::descriptor::Point;

    #[test]
    fn test_scales_independently() {
        let path = CustomPath::new(200.0, 100.0)
            .move_to(10.0, 10.0)
            .line_to(190.0, 10.0)
            .close();
        let out = compile_custom(&path, &BoundingBox::sized(400.0, 200.0)).unwrap();
        assert_eq!(out.to_svg_string(), "M 20 20 L 380 20 Z");

        let out = compile_custom(&path, &BoundingBox::sized(100.0, 300.0)).unwrap();
        assert_eq!(out.to_svg_string(), "M 5 30 L 95 30 Z");
    }

    #[test]
    fn test_zero_extent_is_unscaled() {
        let path = CustomPath::new(0.0, 0.0).move_to(3.0, 4.0).line_to(5.0, 6.0);
        let out = compile_custom(&path, &BoundingBox::sized(400.0, 200.0)).unwrap();
        assert_eq!(out.to_svg_string(), "M 3 4 L 5 6");
    }

    #[test]
    fn test_command_order_preserved() {
        let path = CustomPath::new(10.0, 10.0)
            .move_to(0.0, 0.0)
            .quad_to(Point::new(5.0, 0.0), Point::new(5.0, 5.0))
            .cubic_to(Point::new(5.0, 10.0), Point::new(0.0, 10.0), Point::new(0.0, 5.0))
            .close()
            .move_to(1.0, 1.0)
            .line_to(2.0, 2.0);
        let out = compile_custom(&path, &BoundingBox::sized(10.0, 10.0)).unwrap();
        assert_eq!(out.len(), path.commands.len());
        assert!(matches!(out.commands()[1], PathCommand::QuadTo { .. }));
        assert!(matches!(out.commands()[2], PathCommand::CubicTo { .. }));
        assert_eq!(out.commands()[3], PathCommand::Close);
        assert_eq!(out.commands()[4], PathCommand::MoveTo { x: 1.0, y: 1.0 });
    }

    #[test]
    fn test_zero_sweep_arc_keeps_its_slot() {
        let path = CustomPath::new(20.0, 20.0)
            .move_to(0.0, 10.0)
            .arc_to(10.0, 10.0, 10_800_000.0, 0.0)
            .line_to(20.0, 20.0);
        let out = compile_custom(&path, &BoundingBox::sized(20.0, 20.0)).unwrap();
        assert_eq!(out.len(), path.commands.len());
        assert_eq!(out.commands()[1], PathCommand::LineTo { x: 0.0, y: 10.0 });
        assert_eq!(out.to_svg_string(), "M 0 10 L 0 10 L 20 20");
    }

    #[test]
    fn test_arc_to_uses_pen_and_scaled_radii() {
        // Quarter circle from the left edge to the top edge, stretched 2x horizontally
        let path = CustomPath::new(20.0, 20.0)
            .move_to(0.0, 10.0)
            .arc_to(10.0, 10.0, 10_800_000.0, 5_400_000.0);
        let out = compile_custom(&path, &BoundingBox::sized(40.0, 20.0)).unwrap();
        assert_eq!(out.to_svg_string(), "M 0 10 A 20 10 0 0 1 20 0");
    }

    #[test]
    fn test_pen_returns_to_subpath_start_after_close() {
        let path = CustomPath::new(20.0, 20.0)
            .move_to(0.0, 10.0)
            .line_to(5.0, 5.0)
            .close()
            .arc_to(10.0, 10.0, 10_800_000.0, 5_400_000.0);
        let out = compile_custom(&path, &BoundingBox::sized(20.0, 20.0)).unwrap();
        let Some((x, y)) = out.commands()[3].end_point() else {
            panic!("expected an arc");
        };
        assert!((x - 10.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(compile_custom(&CustomPath::new(10.0, 10.0), &BoundingBox::sized(1.0, 1.0)).is_none());
    }
}
