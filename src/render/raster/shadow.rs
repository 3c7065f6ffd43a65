//! Blurred outer shadows.
//!
//! The shape silhouette is drawn into a transparent layer at the shadow
//! offset, blurred with three box passes (a close Gaussian approximation) and
//! composited under the shape.

use tiny_skia::{Pixmap, PixmapPaint, Transform};

use super::context::{Ink, ShadowState};

/// Box radius whose three-pass blur matches a Gaussian of `sigma`.
fn box_radius(sigma: f32) -> usize {
    if sigma <= 0.0 {
        return 0;
    }
    let width = (4.0 * sigma * sigma + 1.0).sqrt();
    ((width - 1.0) / 2.0).round().max(1.0) as usize
}

/// One sliding-window box pass over `len` pixels spaced `stride` bytes apart.
fn box_pass(data: &mut [u8], scratch: &mut Vec<u32>, start: usize, len: usize, stride: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    for channel in 0..4 {
        scratch.clear();
        scratch.extend((0..len).map(|i| u32::from(data[start + i * stride + channel])));

        let at = |i: isize| -> u32 { scratch[i.clamp(0, len as isize - 1) as usize] };
        let mut sum: u32 = (-(radius as isize)..=radius as isize).map(at).sum();
        for i in 0..len {
            data[start + i * stride + channel] = ((sum + window / 2) / window) as u8;
            let (incoming, outgoing) = (i as isize + radius as isize + 1, i as isize - radius as isize);
            sum = sum + at(incoming) - at(outgoing);
        }
    }
}

/// Blur premultiplied RGBA in place.
pub(crate) fn box_blur(pixmap: &mut Pixmap, sigma: f32) {
    let radius = box_radius(sigma);
    if radius == 0 {
        return;
    }
    let (width, height) = (pixmap.width() as usize, pixmap.height() as usize);
    let data = pixmap.data_mut();
    let mut scratch = Vec::with_capacity(width.max(height));
    for _ in 0..3 {
        for row in 0..height {
            box_pass(data, &mut scratch, row * width * 4, width, 4, radius);
        }
        for col in 0..width {
            box_pass(data, &mut scratch, col * 4, height, width * 4, radius);
        }
    }
}

/// Uniform scale factor of the transform's linear part.
fn device_scale(ts: Transform) -> f32 {
    (ts.sx * ts.sy - ts.kx * ts.ky).abs().sqrt()
}

/// Render a silhouette with `draw`, blur it and composite onto `target`.
///
/// Offset and blur are in user space, so both follow the current transform.
pub(crate) fn draw_shadow(
    target: &mut Pixmap,
    shadow: &ShadowState,
    transform: Transform,
    draw: impl FnOnce(&mut Pixmap, Transform, Ink),
) {
    let Some(mut layer) = Pixmap::new(target.width(), target.height()) else {
        return;
    };
    draw(
        &mut layer,
        transform.pre_translate(shadow.dx, shadow.dy),
        Ink::Silhouette(shadow.color),
    );
    box_blur(&mut layer, shadow.sigma * device_scale(transform));
    target.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Color, Paint, Rect};

    #[test]
    fn test_box_radius() {
        assert_eq!(box_radius(0.0), 0);
        assert_eq!(box_radius(0.2), 1);
        assert_eq!(box_radius(2.0), 2);
        assert_eq!(box_radius(10.0), 10);
    }

    #[test]
    fn test_blur_spreads_and_preserves_mass() {
        let mut pixmap = Pixmap::new(21, 1).unwrap();
        pixmap.pixels_mut()[10] = tiny_skia::ColorU8::from_rgba(0, 0, 0, 255).premultiply();
        box_blur(&mut pixmap, 1.0);

        let alphas: Vec<u32> = pixmap.pixels().iter().map(|p| u32::from(p.alpha())).collect();
        assert!(alphas[10] < 255);
        assert!(alphas[9] > 0 && alphas[11] > 0);
        assert_eq!(alphas[9], alphas[11]);
        let total: u32 = alphas.iter().sum();
        assert!((240..=270).contains(&total), "{total}");
    }

    #[test]
    fn test_shadow_lands_at_offset() {
        let mut target = Pixmap::new(20, 20).unwrap();
        let shadow = ShadowState {
            color: Color::from_rgba8(0, 0, 0, 255),
            sigma: 0.0,
            dx: 10.0,
            dy: 10.0,
        };
        draw_shadow(&mut target, &shadow, Transform::identity(), |layer, ts, ink| {
            let Ink::Silhouette(color) = ink else {
                panic!("shadow layers use a silhouette");
            };
            let mut paint = Paint::default();
            paint.set_color(color);
            let rect = Rect::from_xywh(0.0, 0.0, 5.0, 5.0).unwrap();
            layer.fill_rect(rect, &paint, ts, None);
        });
        assert_eq!(target.pixel(2, 2).unwrap().alpha(), 0);
        assert_eq!(target.pixel(12, 12).unwrap().alpha(), 255);
    }

    #[test]
    fn test_offset_follows_transform() {
        let mut target = Pixmap::new(40, 10).unwrap();
        let shadow = ShadowState {
            color: Color::from_rgba8(0, 0, 0, 255),
            sigma: 0.0,
            dx: 10.0,
            dy: 0.0,
        };
        draw_shadow(&mut target, &shadow, Transform::from_scale(2.0, 2.0), |layer, ts, _| {
            let rect = Rect::from_xywh(0.0, 0.0, 5.0, 5.0).unwrap();
            layer.fill_rect(rect, &Paint::default(), ts, None);
        });
        assert_eq!(target.pixel(12, 2).unwrap().alpha(), 0);
        assert_eq!(target.pixel(25, 2).unwrap().alpha(), 255);
    }

    #[test]
    fn test_device_scale() {
        assert_eq!(device_scale(Transform::identity()), 1.0);
        assert_eq!(device_scale(Transform::from_scale(2.0, 2.0)), 2.0);
        assert_eq!(device_scale(Transform::from_scale(4.0, 1.0)), 2.0);
    }
}
