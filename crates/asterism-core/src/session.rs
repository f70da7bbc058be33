//! The creator session: one explicit context object holding the mode, the
//! drawing, the saved constellations and the glow animator. Every mutation
//! goes through a method here.
//!
//! Input handling depends on the mode:
//! - `Create`: a click on a star toggles it; secondary click and the reset
//!   key clear the drawing.
//! - `Explore`: a click on empty sky clears the displayed constellation;
//!   secondary click also stops the replay and clears the list highlight.
//!
//! While a replay is running, primary clicks are ignored.

use crate::camera::Camera;
use crate::catalog::{Catalog, StarLayer, StarRef};
use crate::color::Color;
use crate::drawing::{Drawing, Toggle};
use crate::error::SaveError;
use crate::geometry::{View, Viewport};
use crate::glow::{GlowAnimator, GlowFrame, GlowPath};
use crate::notify::{Notifier, Severity};
use crate::pick::{find_nearest_star, Hit};
use crate::scene::SceneBackend;
use crate::store::{Constellation, ConstellationStore, KeyValueStore};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Explore,
    Create,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Explore => "explore",
            Mode::Create => "create",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// A replay is running.
    Ignored,
    Toggled(Toggle, usize),
    /// Create mode, nothing within the hit radius.
    Missed,
    /// Explore mode, star under the cursor; nothing happens.
    StarInExplore(usize),
    /// Explore mode, empty sky; the drawing was cleared.
    Cleared,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayOutcome {
    Started,
    NotFound,
    TooFewStars,
}

pub struct Session<B, S, N> {
    mode: Mode,
    catalog: Catalog,
    layers: Vec<StarLayer>,
    drawing: Drawing,
    store: ConstellationStore<S>,
    glow: GlowAnimator,
    scene: B,
    notifier: N,
    rng: StdRng,
    view: View,
    highlighted: Option<String>,
    list_revision: u64,
}

impl<B, S, N> Session<B, S, N>
where
    B: SceneBackend,
    S: KeyValueStore,
    N: Notifier,
{
    pub fn new(catalog: Catalog, scene: B, storage: S, notifier: N, seed: u64) -> Self {
        let layers = catalog.layers();
        let store = ConstellationStore::open(storage);
        log::info!(
            "[session] {} stars in {} layers, {} saved constellations",
            catalog.len(),
            layers.len(),
            store.len()
        );
        Self {
            mode: Mode::Explore,
            catalog,
            layers,
            drawing: Drawing::default(),
            store,
            glow: GlowAnimator::default(),
            scene,
            notifier,
            rng: StdRng::seed_from_u64(seed),
            view: View::default(),
            highlighted: None,
            list_revision: 0,
        }
    }

    // ---------------- Accessors ----------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn constellations(&self) -> &[Constellation] {
        self.store.all()
    }

    pub fn store(&self) -> &ConstellationStore<S> {
        &self.store
    }

    pub fn scene(&self) -> &B {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut B {
        &mut self.scene
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_animating(&self) -> bool {
        self.glow.is_running()
    }

    pub fn animating_id(&self) -> Option<&str> {
        self.glow.animating_id()
    }

    pub fn glow(&self) -> &GlowAnimator {
        &self.glow
    }

    /// List item currently highlighted in the saved-constellation list.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Bumped whenever the saved-constellation list needs re-rendering.
    pub fn list_revision(&self) -> u64 {
        self.list_revision
    }

    pub fn star_count_label(&self) -> String {
        format!("Stars selected: {}", self.drawing.selection().len())
    }

    pub fn can_save(&self, name: &str) -> bool {
        self.drawing.can_save(name)
    }

    // ---------------- Mode ----------------

    pub fn switch_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        log::info!("[session] mode -> {}", mode.as_str());
        match mode {
            Mode::Explore => {
                self.drawing.reset(&mut self.scene);
                self.glow.cancel(&mut self.scene);
                self.list_revision += 1;
                self.highlighted = None;
            }
            Mode::Create => {
                self.glow.cancel(&mut self.scene);
                self.highlighted = None;
            }
        }
    }

    // ---------------- Input ----------------

    pub fn pick(&self, cursor: Vec2) -> Option<Hit> {
        find_nearest_star(cursor, &self.layers, &self.view.camera, self.view.viewport)
    }

    /// Primary click at `cursor` (CSS pixels from the canvas origin).
    pub fn primary_click(&mut self, cursor: Vec2, now_ms: f64) -> ClickOutcome {
        if self.glow.is_running() {
            return ClickOutcome::Ignored;
        }
        let hit = self.pick(cursor);
        match (self.mode, hit) {
            (Mode::Create, Some(hit)) => {
                let index = hit.star.original_index;
                let toggle = self.toggle_star(hit.star, now_ms);
                ClickOutcome::Toggled(toggle, index)
            }
            (Mode::Create, None) => ClickOutcome::Missed,
            (Mode::Explore, Some(hit)) => ClickOutcome::StarInExplore(hit.star.original_index),
            (Mode::Explore, None) => {
                self.reset_drawing();
                ClickOutcome::Cleared
            }
        }
    }

    /// Context-menu equivalent.
    pub fn secondary_action(&mut self) {
        match self.mode {
            Mode::Create => self.reset_drawing(),
            Mode::Explore => {
                self.glow.cancel(&mut self.scene);
                self.reset_drawing();
                self.highlighted = None;
            }
        }
    }

    /// The dedicated reset key; only meaningful while creating.
    pub fn reset_key(&mut self) {
        if self.mode == Mode::Create {
            self.reset_drawing();
        }
    }

    // ---------------- Drawing ----------------

    pub fn toggle_star(&mut self, star: StarRef, now_ms: f64) -> Toggle {
        self.drawing
            .toggle_star(star, &mut self.scene, &mut self.rng, &self.view, now_ms)
    }

    pub fn reset_drawing(&mut self) {
        self.drawing.reset(&mut self.scene);
    }

    /// "Clear all" from the create panel, after the user confirmed.
    pub fn clear_all(&mut self) {
        self.reset_drawing();
    }

    // ---------------- Persistence ----------------

    /// Save the current shape under `name`, then switch to explore mode and
    /// replay it.
    pub fn save_current(
        &mut self,
        name: &str,
        now_ms: f64,
        timestamp_ms: u64,
    ) -> Result<Constellation, SaveError> {
        let indices = self.drawing.selection().indices();
        let color = self.drawing.selection().color().unwrap_or(Color::WHITE);
        let saved = self
            .store
            .save(name, &indices, color, timestamp_ms, &mut self.rng)?;
        self.list_revision += 1;
        self.notifier.notify(
            &format!("'{}' saved successfully! ✨", saved.name),
            Severity::Success,
        );
        self.reset_drawing();
        self.switch_mode(Mode::Explore);
        self.display_constellation(&saved.id, now_ms);
        Ok(saved)
    }

    /// Delete a saved constellation. If it is being replayed, the replay and
    /// its markers are torn down before this returns.
    pub fn delete_constellation(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        if removed {
            self.list_revision += 1;
        }
        if self.highlighted.as_deref() == Some(id) {
            self.highlighted = None;
        }
        if self.glow.cancel_if_animating(id, &mut self.scene) {
            self.reset_drawing();
        }
        removed
    }

    // ---------------- Replay ----------------

    /// Show a saved constellation's markers and start its glow replay.
    pub fn display_constellation(&mut self, id: &str, now_ms: f64) -> DisplayOutcome {
        self.glow.cancel(&mut self.scene);

        let Some(con) = self.store.get(id).cloned() else {
            log::warn!("[session] constellation not found: {}", id);
            return DisplayOutcome::NotFound;
        };

        if self.mode == Mode::Explore {
            self.reset_drawing();
        }

        let stars: Vec<StarRef> = con
            .star_indices
            .iter()
            .filter_map(|&idx| {
                let star = self.catalog.resolve(idx);
                if star.is_none() {
                    log::warn!("[session] star data not found for index {}", idx);
                }
                star
            })
            .collect();

        let Some(path) = GlowPath::new(stars.iter().map(|s| s.position).collect()) else {
            self.notifier.notify(
                &format!(
                    "Constellation '{}' needs at least 2 stars to display a line.",
                    con.name
                ),
                Severity::Warning,
            );
            return DisplayOutcome::TooFewStars;
        };

        self.drawing
            .show_constellation(&stars, con.color, &mut self.scene, &self.view);
        self.glow
            .start(&con.id, path, con.color, now_ms, &mut self.scene);
        self.notifier
            .notify(&format!("Displaying '{}'", con.name), Severity::Info);
        self.highlighted = Some(con.id);
        DisplayOutcome::Started
    }

    // ---------------- Per frame ----------------

    /// Record the camera and surface size for this frame.
    pub fn set_view(&mut self, camera: &Camera, viewport: Viewport) {
        self.view.camera = camera.clone();
        self.view.viewport = viewport;
    }

    /// Run the glow replay frame, if one is due.
    pub fn tick(&mut self, now_ms: f64) -> Option<GlowFrame> {
        let ticket = self.glow.take_due_frame()?;
        let frame = self.glow.on_frame(ticket, now_ms, &mut self.scene);
        if frame == GlowFrame::Finished && self.mode == Mode::Explore {
            self.reset_drawing();
        }
        Some(frame)
    }

    /// Per-frame hook: rescale markers to a constant pixel size.
    pub fn refresh_marker_scales(&mut self, now_ms: f64) {
        self.drawing
            .refresh_markers(&mut self.scene, &self.view, now_ms);
    }
}
