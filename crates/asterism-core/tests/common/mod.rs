// Shared fakes for host-side tests: a scene backend that records what it is
// asked to draw, and a notifier that collects messages.

#![allow(dead_code)]

use asterism_core::scene::HandleAllocator;
use asterism_core::*;
use glam::{Vec2, Vec3};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct FakeMarker {
    pub position: Vec3,
    pub color: Color,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FakeLine {
    pub points: Vec<Vec3>,
    pub style: LineStyle,
}

#[derive(Default)]
pub struct RecordingScene {
    handles: HandleAllocator,
    pub markers: BTreeMap<Handle, FakeMarker>,
    pub lines: BTreeMap<Handle, FakeLine>,
    pub disposed: Vec<Handle>,
    pub lines_created: usize,
}

impl RecordingScene {
    pub fn live_count(&self) -> usize {
        self.markers.len() + self.lines.len()
    }
}

impl SceneBackend for RecordingScene {
    fn create_point_marker(
        &mut self,
        position: Vec3,
        color: Color,
        scale: f32,
        opacity: f32,
    ) -> Handle {
        let h = self.handles.next();
        self.markers.insert(
            h,
            FakeMarker {
                position,
                color,
                scale,
                opacity,
            },
        );
        h
    }

    fn set_marker_appearance(&mut self, marker: Handle, scale: f32, opacity: f32) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.scale = scale;
            m.opacity = opacity;
        }
    }

    fn create_polyline(&mut self, points: &[Vec3], style: LineStyle) -> Handle {
        let h = self.handles.next();
        self.lines.insert(
            h,
            FakeLine {
                points: points.to_vec(),
                style,
            },
        );
        self.lines_created += 1;
        h
    }

    fn dispose(&mut self, handle: Handle) {
        self.markers.remove(&handle);
        self.lines.remove(&handle);
        self.disposed.push(handle);
    }
}

#[derive(Default)]
pub struct CollectingNotifier {
    pub messages: Vec<(String, Severity)>,
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}

pub type TestSession = Session<RecordingScene, MemoryStore, CollectingNotifier>;

pub fn record(name: &str, ra: f32, dec: f32) -> StarRecord {
    StarRecord {
        name: name.to_string(),
        ra,
        dec,
        mag: 3.0,
        original_index: 0,
    }
}

/// Five stars clustered around the -Z axis, a few degrees apart.
pub fn test_catalog() -> Catalog {
    Catalog::new(
        vec![
            record("A", 270.0, 0.0),
            record("B", 275.0, 0.0),
            record("C", 280.0, 5.0),
            record("D", 265.0, -5.0),
            record("E", 90.0, 0.0), // behind the camera
        ],
        SKY_RADIUS,
    )
}

pub fn test_camera() -> Camera {
    Camera {
        aspect: 800.0 / 600.0,
        ..Camera::default()
    }
}

pub fn test_viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

pub fn session_with(storage: MemoryStore) -> TestSession {
    let mut s = Session::new(
        test_catalog(),
        RecordingScene::default(),
        storage,
        CollectingNotifier::default(),
        7,
    );
    s.set_view(&test_camera(), test_viewport());
    s
}

pub fn new_session() -> TestSession {
    session_with(MemoryStore::new())
}

/// Where catalog star `index` appears on the test viewport.
pub fn screen_of(session: &TestSession, index: usize) -> Vec2 {
    let pos = session.catalog().position(index).expect("star in catalog");
    asterism_core::geometry::project_to_screen(pos, &test_camera(), test_viewport())
}

pub fn click_star(session: &mut TestSession, index: usize, now_ms: f64) -> ClickOutcome {
    let at = screen_of(session, index);
    session.primary_click(at, now_ms)
}
