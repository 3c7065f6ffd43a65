//! Preset dash patterns (`a:prstDash`).

use smallvec::{SmallVec, smallvec};

/// Dash and gap lengths as multiples of the line width, `None` for solid
/// or unknown names.
pub fn dash_ratios(name: &str) -> Option<SmallVec<[f64; 6]>> {
    let ratios: SmallVec<[f64; 6]> = match name {
        "sysDot" => smallvec![1.0, 1.0],
        "sysDash" => smallvec![3.0, 1.0],
        "sysDashDot" => smallvec![3.0, 1.0, 1.0, 1.0],
        "sysDashDotDot" => smallvec![3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        "dot" => smallvec![1.0, 3.0],
        "dash" => smallvec![4.0, 3.0],
        "lgDash" => smallvec![8.0, 3.0],
        "dashDot" => smallvec![4.0, 3.0, 1.0, 3.0],
        "lgDashDot" => smallvec![8.0, 3.0, 1.0, 3.0],
        "lgDashDotDot" => smallvec![8.0, 3.0, 1.0, 3.0, 1.0, 3.0],
        "solid" => return None,
        other => {
            log::debug!("unknown dash preset {other:?}, drawing solid");
            return None;
        },
    };
    Some(ratios)
}

/// Absolute dash array for a stroke of `width` pixels. Hairlines use a
/// width of one so the pattern stays visible.
pub fn dash_array(name: &str, width: f64) -> Option<SmallVec<[f64; 6]>> {
    let unit = width.max(1.0);
    dash_ratios(name).map(|ratios| ratios.into_iter().map(|r| r * unit).collect())
}
