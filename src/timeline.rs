//! Playback timeline state machine
//!
//! Every transition is a pure function from one `Timeline` value to the next.
//! Timestamps are host milliseconds (`performance.now()` on the web); the
//! caller passes them in so transitions are testable without a clock.
//!
//! | Event        | Stopped                 | Playing                  | Paused                   |
//! |--------------|-------------------------|--------------------------|--------------------------|
//! | toggle       | Playing, progress = 0   | Paused, progress = now   | Playing, resume          |
//! | set duration | Paused                  | Paused, progress pending | Paused                   |
//! | finish       | -                       | Stopped, progress clear  | -                        |

use crate::consts::{MIN_DURATION, MS_PER_SECOND};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Nothing playing; the next toggle replays from the start
    #[default]
    Stopped,
    /// Progress is being recomputed every frame
    Playing,
    /// Progress is frozen
    Paused,
}

/// Playback controller for the scene rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    play_state: PlayState,
    /// Seconds, always >= MIN_DURATION
    duration: f64,
    /// Committed progress in [0, 1]. While playing this is the point the run
    /// resumed from. `None` after a finished run, or after a duration change
    /// interrupted playback and the driver has not committed yet.
    progress: Option<f64>,
    /// Host timestamp (ms) of the last play/resume
    start_time: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(MIN_DURATION)
    }
}

impl Timeline {
    /// A stopped timeline at progress 0
    pub fn new(duration: f64) -> Self {
        Self {
            play_state: PlayState::Stopped,
            duration: clamp_duration(duration),
            progress: Some(0.0),
            start_time: 0.0,
        }
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.play_state == PlayState::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.play_state == PlayState::Stopped
    }

    /// Paused with no committed progress yet
    pub fn awaiting_commit(&self) -> bool {
        self.is_paused() && self.progress.is_none()
    }

    /// The play/pause button
    pub fn toggle_play_pause(self, now: f64) -> Self {
        match self.play_state {
            PlayState::Stopped => self.replay(now),
            PlayState::Playing => self.pause(now),
            PlayState::Paused => self.play(now),
        }
    }

    /// Resume from the committed progress
    pub fn play(self, now: f64) -> Self {
        Self {
            play_state: PlayState::Playing,
            start_time: now,
            ..self
        }
    }

    /// Start over from progress 0, ignoring any stale value
    pub fn replay(self, now: f64) -> Self {
        Self {
            progress: Some(0.0),
            ..self.play(now)
        }
    }

    /// Freeze playback, committing the progress reached at `now`
    pub fn pause(self, now: f64) -> Self {
        let progress = match self.play_state {
            PlayState::Playing => Some(self.linear_progress_at(now)),
            _ => self.progress,
        };
        Self {
            play_state: PlayState::Paused,
            progress,
            ..self
        }
    }

    /// A play-through finished
    pub fn stop(self) -> Self {
        Self {
            play_state: PlayState::Stopped,
            progress: None,
            ..self
        }
    }

    /// Change the duration. Always pauses, whatever the prior state.
    ///
    /// Interrupting playback leaves progress uncommitted: no timestamp is
    /// available here, so the driver commits what it last computed.
    pub fn update_duration(self, duration: f64) -> Self {
        let progress = if self.is_playing() { None } else { self.progress };
        Self {
            play_state: PlayState::Paused,
            duration: clamp_duration(duration),
            progress,
            ..self
        }
    }

    /// Store progress computed outside the timeline (pause commit)
    pub fn commit_progress(self, progress: f64) -> Self {
        Self {
            progress: Some(clamp_progress(progress)),
            ..self
        }
    }

    /// Linear progress at `now`, advancing at `1 / duration` per second from
    /// the committed progress and saturating at 1
    pub fn linear_progress_at(&self, now: f64) -> f64 {
        let base = self.progress.unwrap_or(0.0);
        let elapsed = (now - self.start_time).max(0.0);
        clamp_progress(base + elapsed / (self.duration * MS_PER_SECOND))
    }
}

fn clamp_duration(duration: f64) -> f64 {
    // f64::max ignores NaN, so garbage input lands on the minimum
    duration.max(MIN_DURATION)
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
