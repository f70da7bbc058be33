//! Screen-space nearest-star picking.
//!
//! Brute force over every point of every layer. Picking only runs on clicks,
//! so there is no spatial index.

use crate::camera::Camera;
use crate::catalog::{StarLayer, StarRef};
use crate::constants::HIT_RADIUS_PX;
use crate::geometry::{project_to_screen_checked, Viewport};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// Pixel distance between cursor and star.
    pub distance: f32,
    pub star: StarRef,
}

/// Index of the screen point nearest to `cursor` and its squared distance.
///
/// Ties keep the first point encountered.
#[inline]
pub fn nearest_screen_point<I>(cursor: Vec2, points: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut best = None::<(usize, f32)>;
    for (i, p) in points.into_iter().enumerate() {
        let d2 = p.distance_squared(cursor);
        match best {
            Some((_, bd2)) if d2 >= bd2 => {}
            _ => best = Some((i, d2)),
        }
    }
    best
}

#[inline]
pub fn within_hit_radius(distance_squared: f32) -> bool {
    distance_squared.sqrt() <= HIT_RADIUS_PX
}

/// Find the star nearest to `cursor` (canvas pixels) within
/// [`HIT_RADIUS_PX`]. Points behind the camera are never hit. Layers are
/// scanned in order, so on a tie the earlier layer wins.
pub fn find_nearest_star(
    cursor: Vec2,
    layers: &[StarLayer],
    camera: &Camera,
    viewport: Viewport,
) -> Option<Hit> {
    let visible: Vec<(usize, usize, Vec2)> = layers
        .iter()
        .enumerate()
        .flat_map(|(li, layer)| {
            (0..layer.len()).filter_map(move |pi| {
                project_to_screen_checked(layer.position(pi), camera, viewport)
                    .map(|screen| (li, pi, screen))
            })
        })
        .collect();
    let (k, d2) = nearest_screen_point(cursor, visible.iter().map(|&(_, _, screen)| screen))?;
    if !within_hit_radius(d2) {
        log::debug!("[pick] miss, nearest star {:.1}px away", d2.sqrt());
        return None;
    }
    let (li, pi, _) = visible[k];
    let layer = &layers[li];
    let record = layer.data[pi].clone();
    Some(Hit {
        distance: d2.sqrt(),
        star: StarRef {
            original_index: record.original_index,
            position: layer.position(pi),
            record,
        },
    })
}
