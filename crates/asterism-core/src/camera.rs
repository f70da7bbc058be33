//! Camera description shared by picking, marker sizing and the renderer.
//!
//! The camera sits inside the celestial sphere and looks outwards. The front
//! end rotates it with yaw/pitch drags and zooms by narrowing the field of
//! view, so the eye position only changes when the caller moves it.

use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: 60f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.eye
    }

    /// Point the camera along yaw/pitch (radians) from its current eye.
    pub fn look_along(&mut self, yaw: f32, pitch: f32) {
        let pitch = pitch.clamp(-1.55, 1.55);
        let dir = Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), -pitch.cos() * yaw.cos());
        self.target = self.eye + dir;
    }

    /// Camera right and up axes in world space, used to billboard sprites.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let fwd = (self.target - self.eye).normalize_or_zero();
        let right = fwd.cross(self.up).normalize_or_zero();
        let up = right.cross(fwd);
        (right, up)
    }
}
