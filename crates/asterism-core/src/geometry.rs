//! Projection adapter between catalog coordinates, world space and screen
//! pixels.

use crate::camera::Camera;
use glam::{Vec2, Vec3, Vec4};

/// Render surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// Camera and surface as of the last frame.
#[derive(Clone, Debug)]
pub struct View {
    pub camera: Camera,
    pub viewport: Viewport,
}

impl Default for View {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            viewport: Viewport::new(1.0, 1.0),
        }
    }
}

impl View {
    /// World size of a `pixel_size` marker at `world` for this view.
    pub fn marker_scale(&self, pixel_size: f32, world: Vec3) -> f32 {
        pixel_size_to_world_scale(pixel_size, world, &self.camera, self.viewport.height)
    }
}

/// Right ascension/declination (degrees) to a point on a sphere of `radius`.
pub fn spherical_to_cartesian(ra_deg: f32, dec_deg: f32, radius: f32) -> Vec3 {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    Vec3::new(
        radius * dec.cos() * ra.cos(),
        radius * dec.sin(),
        radius * dec.cos() * ra.sin(),
    )
}

/// Normalized device coordinates of `world` for the given camera.
#[inline]
pub fn project_to_ndc(world: Vec3, camera: &Camera) -> Vec3 {
    let clip = camera.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
    clip.truncate() / clip.w
}

/// Screen pixel position (top-left origin, y down) of `world`.
pub fn project_to_screen(world: Vec3, camera: &Camera, viewport: Viewport) -> Vec2 {
    ndc_to_screen(project_to_ndc(world, camera), viewport)
}

/// Like [`project_to_screen`], but `None` for points at or behind the eye
/// plane, which would otherwise mirror onto the screen.
pub fn project_to_screen_checked(world: Vec3, camera: &Camera, viewport: Viewport) -> Option<Vec2> {
    let clip = camera.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    Some(ndc_to_screen(clip.truncate() / clip.w, viewport))
}

#[inline]
pub fn ndc_to_screen(ndc: Vec3, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.width,
        (-ndc.y * 0.5 + 0.5) * viewport.height,
    )
}

/// World-space size that covers `pixel_size` screen pixels at `world`.
pub fn pixel_size_to_world_scale(
    pixel_size: f32,
    world: Vec3,
    camera: &Camera,
    viewport_height_px: f32,
) -> f32 {
    let distance = camera.world_position().distance(world);
    let visible_height = 2.0 * (camera.fovy_radians * 0.5).tan() * distance;
    let world_per_pixel = visible_height / viewport_height_px.max(1.0);
    world_per_pixel * pixel_size
}

/// Total length of a polyline through `points`.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
