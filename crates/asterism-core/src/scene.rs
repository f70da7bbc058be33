//! Capability interface between the core and whatever draws markers and
//! lines. The web front-end implements it on top of WebGPU; tests use a
//! recording fake.

use crate::color::Color;
use glam::Vec3;

/// Opaque id of something the backend is drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

/// Monotonic handle source for backends.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn next(&mut self) -> Handle {
        self.next += 1;
        Handle(self.next)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Consecutive points are joined.
    Strip,
    /// Points are taken in pairs, each pair is one segment.
    Segments,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    pub opacity: f32,
    pub topology: Topology,
    pub additive: bool,
}

pub trait SceneBackend {
    /// Add a round billboard marker of world size `scale`.
    fn create_point_marker(&mut self, position: Vec3, color: Color, scale: f32, opacity: f32)
        -> Handle;
    fn set_marker_appearance(&mut self, marker: Handle, scale: f32, opacity: f32);
    fn create_polyline(&mut self, points: &[Vec3], style: LineStyle) -> Handle;
    /// Remove a marker or line. Unknown handles are ignored.
    fn dispose(&mut self, handle: Handle);
}
