use crate::constants::{
    DRAG_CLICK_SLOP_PX, DRAG_RADIANS_PER_PX, FOV_DEFAULT_DEG, FOV_MAX_DEG, FOV_MIN_DEG,
    WHEEL_ZOOM_DEG_PER_PX,
};
use asterism_core::{Camera, Viewport};
use glam::Vec2;
use web_sys as web;

/// Pointer position relative to the canvas, in CSS pixels. Picking and
/// marker sizing both work in this space.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Vec2::new(x_css, y_css)
}

/// Reset keys, matched on `KeyboardEvent.key`.
#[inline]
pub fn is_reset_key(key: &str) -> bool {
    matches!(key, "r" | "R")
}

#[inline]
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(rect.width() as f32, rect.height() as f32)
}

const PITCH_LIMIT: f32 = 1.55;

/// Look-around state: the camera sits at the origin and turns in place.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub fov_deg: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov_deg: FOV_DEFAULT_DEG,
        }
    }
}

impl CameraRig {
    /// Dragging right turns the view left, like grabbing the sky.
    pub fn drag(&mut self, delta_px: Vec2) {
        let k = DRAG_RADIANS_PER_PX * (self.fov_deg / FOV_DEFAULT_DEG);
        self.yaw -= delta_px.x * k;
        self.pitch = (self.pitch + delta_px.y * k).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, wheel_delta_px: f32) {
        self.fov_deg =
            (self.fov_deg + wheel_delta_px * WHEEL_ZOOM_DEG_PER_PX).clamp(FOV_MIN_DEG, FOV_MAX_DEG);
    }

    pub fn camera(&self, viewport: Viewport) -> Camera {
        let mut camera = Camera {
            aspect: viewport.aspect(),
            fovy_radians: self.fov_deg.to_radians(),
            ..Camera::default()
        };
        camera.look_along(self.yaw, self.pitch);
        camera
    }
}

/// Press-move-release tracking. A press that travels further than the slop
/// becomes a drag and the click that follows is swallowed.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
    pub travelled: f32,
    pub suppress_click: bool,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        *self = Self {
            active: true,
            pointer_id,
            last: at,
            travelled: 0.0,
            suppress_click: false,
        };
    }

    /// Returns the movement since the last event while a drag is active.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travelled += delta.length();
        if self.travelled > DRAG_CLICK_SLOP_PX {
            self.suppress_click = true;
        }
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    /// Consume the suppression flag; `true` means the click should be ignored.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}
