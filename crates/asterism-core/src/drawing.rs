//! The in-progress shape: selected stars, their markers and the authoring
//! polyline.
//!
//! Markers are owned here whether they came from a click in create mode or
//! from replaying a saved constellation. The polyline is never patched; it is
//! disposed and rebuilt whenever the selection changes.

use crate::catalog::StarRef;
use crate::color::Color;
use crate::constants::{LINE_WIDTH, MARKER_PIXEL_SIZE, MIN_CONSTELLATION_STARS};
use crate::geometry::View;
use crate::scene::{Handle, LineStyle, SceneBackend, Topology};
use crate::tween::PopIn;
use glam::Vec3;
use rand::Rng;

/// Ordered, duplicate-free selection plus the shape color.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    stars: Vec<StarRef>,
    color: Option<Color>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn contains(&self, original_index: usize) -> bool {
        self.stars.iter().any(|s| s.original_index == original_index)
    }

    pub fn stars(&self) -> &[StarRef] {
        &self.stars
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Catalog indices in click order; this is what gets persisted.
    pub fn indices(&self) -> Vec<usize> {
        self.stars.iter().map(|s| s.original_index).collect()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.stars.iter().map(|s| s.position).collect()
    }
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub handle: Handle,
    pub position: Vec3,
    pub color: Color,
    pub original_index: usize,
    pop_in: Option<PopIn>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Debug, Default)]
pub struct Drawing {
    selection: Selection,
    markers: Vec<Marker>,
    polyline: Option<Handle>,
}

impl Drawing {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn polyline(&self) -> Option<Handle> {
        self.polyline
    }

    /// Save is possible with at least two stars and a non-blank name.
    pub fn can_save(&self, name: &str) -> bool {
        self.selection.len() >= MIN_CONSTELLATION_STARS && !name.trim().is_empty()
    }

    /// Add `star` to the shape, or remove it if it is already part of it.
    pub fn toggle_star<B, R>(
        &mut self,
        star: StarRef,
        scene: &mut B,
        rng: &mut R,
        view: &View,
        now_ms: f64,
    ) -> Toggle
    where
        B: SceneBackend + ?Sized,
        R: Rng + ?Sized,
    {
        let existing = self
            .selection
            .stars
            .iter()
            .position(|s| s.original_index == star.original_index);
        let toggle = match existing {
            None => {
                let color = *self.selection.color.get_or_insert_with(|| Color::random(rng));
                let pop_in = PopIn::new(now_ms);
                let first = pop_in.sample(now_ms);
                let scale = view.marker_scale(MARKER_PIXEL_SIZE, star.position) * first.scale;
                let handle = scene.create_point_marker(star.position, color, scale, first.opacity);
                self.markers.push(Marker {
                    handle,
                    position: star.position,
                    color,
                    original_index: star.original_index,
                    pop_in: Some(pop_in),
                });
                self.selection.stars.push(star);
                Toggle::Added
            }
            Some(i) => {
                let removed = self.selection.stars.remove(i);
                if let Some(mi) = self
                    .markers
                    .iter()
                    .position(|m| m.original_index == removed.original_index)
                {
                    let marker = self.markers.remove(mi);
                    scene.dispose(marker.handle);
                }
                if self.selection.stars.is_empty() {
                    self.selection.color = None;
                }
                Toggle::Removed
            }
        };
        self.rebuild_polyline(scene);
        toggle
    }

    /// Markers for every star of a replayed constellation. They stay until
    /// the next reset.
    pub fn show_constellation<B>(&mut self, stars: &[StarRef], color: Color, scene: &mut B, view: &View)
    where
        B: SceneBackend + ?Sized,
    {
        for star in stars {
            let scale = view.marker_scale(MARKER_PIXEL_SIZE, star.position);
            let handle = scene.create_point_marker(star.position, color, scale, 1.0);
            self.markers.push(Marker {
                handle,
                position: star.position,
                color,
                original_index: star.original_index,
                pop_in: None,
            });
        }
    }

    /// Drop every marker, the polyline, the selection and its color.
    pub fn reset<B>(&mut self, scene: &mut B)
    where
        B: SceneBackend + ?Sized,
    {
        for m in self.markers.drain(..) {
            scene.dispose(m.handle);
        }
        if let Some(line) = self.polyline.take() {
            scene.dispose(line);
        }
        self.selection.stars.clear();
        self.selection.color = None;
    }

    /// Keep markers at a constant pixel size for the current camera and
    /// advance their pop-in.
    pub fn refresh_markers<B>(&mut self, scene: &mut B, view: &View, now_ms: f64)
    where
        B: SceneBackend + ?Sized,
    {
        for m in &mut self.markers {
            let base = view.marker_scale(MARKER_PIXEL_SIZE, m.position);
            let (scale, opacity) = match m.pop_in {
                Some(p) => {
                    let s = p.sample(now_ms);
                    if s.done {
                        m.pop_in = None;
                    }
                    (base * s.scale, s.opacity)
                }
                None => (base, 1.0),
            };
            scene.set_marker_appearance(m.handle, scale, opacity);
        }
    }

    fn rebuild_polyline<B>(&mut self, scene: &mut B)
    where
        B: SceneBackend + ?Sized,
    {
        if let Some(line) = self.polyline.take() {
            scene.dispose(line);
        }
        if self.selection.len() < 2 {
            return;
        }
        let Some(color) = self.selection.color else {
            return;
        };
        let style = LineStyle {
            color,
            width: LINE_WIDTH,
            opacity: 1.0,
            topology: Topology::Strip,
            additive: false,
        };
        self.polyline = Some(scene.create_polyline(&self.selection.positions(), style));
    }
}
