// CPU-side scene: everything the core asked to draw, keyed by handle. The
// GPU state reads it back as instance and vertex data each frame.

use super::{LineVertex, SpriteInstance};
use asterism_core::scene::HandleAllocator;
use asterism_core::{Color, Handle, LineStyle, SceneBackend, Topology};
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Copy, Debug)]
struct MarkerItem {
    position: Vec3,
    color: Color,
    scale: f32,
    opacity: f32,
}

#[derive(Clone, Debug)]
struct LineItem {
    points: Vec<Vec3>,
    style: LineStyle,
}

#[derive(Default)]
pub struct SceneGraph {
    handles: HandleAllocator,
    markers: FnvHashMap<Handle, MarkerItem>,
    lines: FnvHashMap<Handle, LineItem>,
}

impl SceneGraph {
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Billboard instances for every live marker.
    pub fn marker_instances(&self, out: &mut Vec<SpriteInstance>) {
        out.clear();
        out.extend(self.markers.values().map(|m| SpriteInstance {
            position: m.position.to_array(),
            size: m.scale,
            color: m.color.to_linear_rgba(m.opacity),
        }));
    }

    /// Line-list vertices, split by blending.
    pub fn line_vertices(&self, plain: &mut Vec<LineVertex>, additive: &mut Vec<LineVertex>) {
        plain.clear();
        additive.clear();
        for line in self.lines.values() {
            let out = if line.style.additive {
                &mut *additive
            } else {
                &mut *plain
            };
            let color = line.style.color.to_linear_rgba(line.style.opacity);
            let vertex = |p: Vec3| LineVertex {
                position: p.to_array(),
                color,
            };
            match line.style.topology {
                Topology::Strip => {
                    for pair in line.points.windows(2) {
                        out.push(vertex(pair[0]));
                        out.push(vertex(pair[1]));
                    }
                }
                Topology::Segments => {
                    for pair in line.points.chunks_exact(2) {
                        out.push(vertex(pair[0]));
                        out.push(vertex(pair[1]));
                    }
                }
            }
        }
    }
}

impl SceneBackend for SceneGraph {
    fn create_point_marker(
        &mut self,
        position: Vec3,
        color: Color,
        scale: f32,
        opacity: f32,
    ) -> Handle {
        let handle = self.handles.next();
        self.markers.insert(
            handle,
            MarkerItem {
                position,
                color,
                scale,
                opacity,
            },
        );
        handle
    }

    fn set_marker_appearance(&mut self, marker: Handle, scale: f32, opacity: f32) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.scale = scale;
            m.opacity = opacity;
        }
    }

    fn create_polyline(&mut self, points: &[Vec3], style: LineStyle) -> Handle {
        let handle = self.handles.next();
        self.lines.insert(
            handle,
            LineItem {
                points: points.to_vec(),
                style,
            },
        );
        handle
    }

    fn dispose(&mut self, handle: Handle) {
        if self.markers.remove(&handle).is_none() {
            self.lines.remove(&handle);
        }
    }
}
