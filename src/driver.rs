//! Animation driver
//!
//! Runs once per display refresh. Each tick derives the rotation offset from
//! the timeline, draws a rotated copy of the scene (the stored scene is never
//! touched) and decides whether another tick is needed.
//!
//! Scheduling goes through `FrameQueue`: the host pumps it once per refresh
//! (`requestAnimationFrame` on the web, a fixed-step loop natively). Handles
//! only ever increase, and at most one frame is pending at a time, so a
//! cancelled tick can never come back to resurrect a stopped timeline.

use glam::DVec2;

use crate::easing::ease_in_out_cubic;
use crate::hit;
use crate::renderer::{DrawSurface, draw_frame};
use crate::scene::{Entity, EntityId, Scene};
use crate::settings::Theme;
use crate::timeline::{PlayState, Timeline};

/// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Single-slot, cancellable frame request queue
#[derive(Debug, Default)]
pub struct FrameQueue {
    last_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. A frame already pending absorbs the request.
    pub fn request(&mut self) -> FrameHandle {
        if let Some(handle) = self.pending {
            return handle;
        }
        self.last_id += 1;
        let handle = FrameHandle(self.last_id);
        self.pending = Some(handle);
        handle
    }

    /// Drop a pending frame. Stale handles are ignored.
    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Drop whatever is pending
    pub fn cancel_all(&mut self) {
        self.pending = None;
    }

    /// Claim the pending frame, if any (host refresh callback)
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// What the caller must do after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Playing; the next tick is scheduled
    Continue,
    /// Frame drawn, nothing further until the next state change
    Idle,
    /// Paused without committed progress: store this timeline
    Committed(Timeline),
    /// Play-through complete: store this (stopped) timeline
    Finished(Timeline),
}

/// Per-tick animation state, owned by the editor
#[derive(Debug)]
pub struct AnimationDriver {
    /// Degrees of rotation over one full play-through
    rotate_by: f64,
    theme: Theme,
    /// Linear progress computed by the last playing tick and not yet
    /// committed into a timeline
    pending_progress: Option<f64>,
    /// Our own next tick
    scheduled: Option<FrameHandle>,
    /// Linear progress of the last frame actually drawn
    shown_progress: f64,
}

impl AnimationDriver {
    pub fn new(rotate_by: f64, theme: Theme) -> Self {
        Self {
            rotate_by,
            theme,
            pending_progress: None,
            scheduled: None,
            shown_progress: 0.0,
        }
    }

    pub fn pending_progress(&self) -> Option<f64> {
        self.pending_progress
    }

    pub fn scheduled(&self) -> Option<FrameHandle> {
        self.scheduled
    }

    pub fn shown_progress(&self) -> f64 {
        self.shown_progress
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Start ticking (playback began or resumed)
    pub fn schedule(&mut self, frames: &mut FrameQueue) {
        self.scheduled = Some(frames.request());
    }

    /// Cancel our pending tick. Must run before the timeline leaves Playing.
    pub fn cancel(&mut self, frames: &mut FrameQueue) {
        if let Some(handle) = self.scheduled.take() {
            frames.cancel(handle);
            log::trace!("Cancelled frame {}", handle.id());
        }
    }

    /// Commit a pending pause into `timeline` without drawing
    pub fn settle(&mut self, timeline: Timeline) -> Timeline {
        if timeline.awaiting_commit() {
            timeline.commit_progress(self.pending_progress.take().unwrap_or(0.0))
        } else {
            timeline
        }
    }

    /// Record where a playing timeline is at `now`, so a commit that
    /// happens before the next tick has the right value
    pub fn sample(&mut self, timeline: &Timeline, now: f64) {
        if timeline.is_playing() {
            self.pending_progress = Some(timeline.linear_progress_at(now));
        }
    }

    /// Forget uncommitted progress (the timeline committed its own)
    pub fn discard_pending(&mut self) {
        self.pending_progress = None;
    }

    /// Progress shown for `timeline` at `now` (linear, before easing)
    pub fn progress_at(&self, timeline: &Timeline, now: f64) -> f64 {
        match timeline.play_state() {
            PlayState::Playing => timeline.linear_progress_at(now),
            PlayState::Paused => timeline.progress().or(self.pending_progress).unwrap_or(0.0),
            PlayState::Stopped => 0.0,
        }
    }

    /// Degrees every entity is turned by at the given linear progress
    pub fn rotation_offset(&self, linear_progress: f64) -> f64 {
        ease_in_out_cubic(linear_progress) * self.rotate_by
    }

    /// Draw-time copy of the scene's entities at the given linear progress
    pub fn animated_entities(&self, scene: &Scene, linear_progress: f64) -> Vec<Entity> {
        let offset = self.rotation_offset(linear_progress);
        scene.entities.iter().map(|e| e.rotated_by(offset)).collect()
    }

    /// Entity under a surface point in the pose last drawn
    pub fn pick(&self, scene: &Scene, surface_point: DVec2) -> Option<EntityId> {
        let shown = scene.with_entities(self.animated_entities(scene, self.shown_progress));
        hit::pick(&shown, surface_point)
    }

    /// Run one tick.
    ///
    /// `frame` is the handle the host just claimed from the queue.
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        now: f64,
        frame: Option<FrameHandle>,
        scene: &Scene,
        timeline: &Timeline,
        surface: &mut S,
        frames: &mut FrameQueue,
    ) -> TickOutcome {
        if frame.is_some() && frame == self.scheduled {
            self.scheduled = None;
        }

        let progress = self.progress_at(timeline, now);
        if timeline.is_playing() {
            self.pending_progress = Some(progress);
        }

        let eased = ease_in_out_cubic(progress);
        if let Some(dims) = scene.dimensions {
            let entities = self.animated_entities(scene, progress);
            self.shown_progress = progress;
            if let Err(e) = draw_frame(surface, &dims, &entities, &self.theme) {
                log::warn!("Frame draw failed: {:?}", e);
            }
        } else {
            log::trace!("Skipping draw, surface size unknown");
        }

        if timeline.awaiting_commit() {
            self.cancel(frames);
            self.pending_progress = None;
            log::debug!("Committing paused progress {:.3}", progress);
            return TickOutcome::Committed(timeline.commit_progress(progress));
        }

        if timeline.is_playing() {
            if eased >= 1.0 {
                self.cancel(frames);
                self.pending_progress = None;
                log::info!("Play-through finished");
                return TickOutcome::Finished(timeline.stop());
            }
            self.schedule(frames);
            return TickOutcome::Continue;
        }

        TickOutcome::Idle
    }
}
