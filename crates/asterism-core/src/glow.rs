//! Glow replay of a saved polyline.
//!
//! A band of fixed path-ratio length sweeps from the first star to the last
//! while fading out. Positions along the path are ratios of the total arc
//! length, so the band moves at constant speed however uneven the segments
//! are.

use crate::color::Color;
use crate::constants::{
    GLOW_DURATION_MS, GLOW_FADE, GLOW_LENGTH, GLOW_SPEED, GLOW_WIDTH_MULTIPLIER, LINE_WIDTH,
};
use crate::geometry::polyline_length;
use crate::scene::{Handle, LineStyle, SceneBackend, Topology};
use crate::task::{FrameTask, FrameTicket};
use glam::Vec3;
use smallvec::SmallVec;

pub type GlowSegments = SmallVec<[[Vec3; 2]; 4]>;

/// Normalized animation time in `[0, 1]`.
#[inline]
pub fn progress(elapsed_ms: f64) -> f32 {
    (elapsed_ms / GLOW_DURATION_MS).clamp(0.0, 1.0) as f32
}

#[inline]
pub fn opacity(progress: f32) -> f32 {
    (1.0 - progress * GLOW_FADE).max(0.0)
}

/// Lit interval of the path, as ratios of total length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowBand {
    pub tail: f32,
    pub head: f32,
}

impl GlowBand {
    pub fn at(progress: f32) -> Self {
        let head = progress * GLOW_SPEED;
        Self {
            tail: head - GLOW_LENGTH,
            head,
        }
    }
}

/// A polyline with the cumulative length ratio interval of every segment.
#[derive(Clone, Debug)]
pub struct GlowPath {
    points: Vec<Vec3>,
    ratios: Vec<(f32, f32)>,
}

impl GlowPath {
    /// `None` for fewer than two points.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let total = polyline_length(&points);
        let mut ratios = Vec::with_capacity(points.len() - 1);
        let mut acc = 0.0f32;
        for w in points.windows(2) {
            let len = w[0].distance(w[1]);
            let r = if total > f32::EPSILON { len / total } else { 0.0 };
            ratios.push((acc, acc + r));
            acc += r;
        }
        Some(Self { points, ratios })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// `[start, end]` ratio of each segment.
    pub fn ratios(&self) -> &[(f32, f32)] {
        &self.ratios
    }

    /// Pieces of the path covered by `band`, one per touched segment.
    pub fn segments_in(&self, band: GlowBand) -> GlowSegments {
        let mut out = GlowSegments::new();
        for (i, &(start, end)) in self.ratios.iter().enumerate() {
            let span = end - start;
            if span <= f32::EPSILON {
                continue;
            }
            let from = ((band.tail - start) / span).max(0.0);
            let to = ((band.head - start) / span).min(1.0);
            if from < to {
                let (a, b) = (self.points[i], self.points[i + 1]);
                out.push([a.lerp(b, from), a.lerp(b, to)]);
            }
        }
        out
    }
}

struct GlowSession {
    constellation_id: String,
    start_ms: f64,
    path: GlowPath,
    color: Color,
    line: Option<Handle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlowFrame {
    /// The ticket belonged to a cancelled or replaced session.
    Aborted,
    Running,
    /// The band reached the end; the session is gone.
    Finished,
}

/// `Idle` when no session is held, `Running` otherwise. At most one session
/// exists; starting another or cancelling tears the old one down first.
#[derive(Default)]
pub struct GlowAnimator {
    session: Option<GlowSession>,
    task: FrameTask,
}

impl GlowAnimator {
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn animating_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.constellation_id.as_str())
    }

    /// Transient line of the current frame, if one is drawn.
    pub fn line(&self) -> Option<Handle> {
        self.session.as_ref().and_then(|s| s.line)
    }

    pub fn start<B>(
        &mut self,
        constellation_id: &str,
        path: GlowPath,
        color: Color,
        now_ms: f64,
        scene: &mut B,
    ) -> FrameTicket
    where
        B: SceneBackend + ?Sized,
    {
        self.cancel(scene);
        self.session = Some(GlowSession {
            constellation_id: constellation_id.to_string(),
            start_ms: now_ms,
            path,
            color,
            line: None,
        });
        let ticket = self.task.begin();
        log::info!("[glow] start {} (generation {})", constellation_id, ticket.generation());
        ticket
    }

    /// Stop the running session, if any, and dispose its line right away.
    pub fn cancel<B>(&mut self, scene: &mut B) -> bool
    where
        B: SceneBackend + ?Sized,
    {
        self.task.cancel();
        match self.session.take() {
            Some(s) => {
                if let Some(line) = s.line {
                    scene.dispose(line);
                }
                log::info!("[glow] cancelled {}", s.constellation_id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_if_animating<B>(&mut self, constellation_id: &str, scene: &mut B) -> bool
    where
        B: SceneBackend + ?Sized,
    {
        if self.animating_id() == Some(constellation_id) {
            self.cancel(scene)
        } else {
            false
        }
    }

    /// The frame requested by the running session, if one is due.
    pub fn take_due_frame(&mut self) -> Option<FrameTicket> {
        self.task.take_due()
    }

    /// Render one frame of the session that issued `ticket`.
    pub fn on_frame<B>(&mut self, ticket: FrameTicket, now_ms: f64, scene: &mut B) -> GlowFrame
    where
        B: SceneBackend + ?Sized,
    {
        if !self.task.is_current(ticket) {
            log::debug!("[glow] stale frame, generation {}", ticket.generation());
            return GlowFrame::Aborted;
        }
        let Some(session) = self.session.as_mut() else {
            return GlowFrame::Aborted;
        };
        let p = progress(now_ms - session.start_ms);

        if let Some(line) = session.line.take() {
            scene.dispose(line);
        }
        let segments = session.path.segments_in(GlowBand::at(p));
        if !segments.is_empty() {
            let points: Vec<Vec3> = segments.iter().flatten().copied().collect();
            let style = LineStyle {
                color: session.color,
                width: LINE_WIDTH * GLOW_WIDTH_MULTIPLIER,
                opacity: opacity(p),
                topology: Topology::Segments,
                additive: true,
            };
            session.line = Some(scene.create_polyline(&points, style));
        }

        if p >= 1.0 {
            if let Some(line) = session.line.take() {
                scene.dispose(line);
            }
            log::info!("[glow] finished {}", session.constellation_id);
            self.session = None;
            self.task.cancel();
            return GlowFrame::Finished;
        }
        self.task.reschedule(ticket);
        GlowFrame::Running
    }
}
