//! Editor session
//!
//! Owns the scene, the timeline, the animation driver and the injected RNG.
//! Every host event (resize, click, control panel, import/export, display
//! refresh) maps onto one method here.
//!
//! Ordering rule: when leaving Playing, the driver's pending tick is
//! cancelled before the timeline changes.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::driver::{AnimationDriver, FrameQueue, TickOutcome};
use crate::error::EditorError;
use crate::persistence::{self, ExportedScene};
use crate::renderer::DrawSurface;
use crate::scene::{EntityId, Scene, add_random_rectangle, example_scene, recolor_entity};
use crate::settings::EditorSettings;
use crate::timeline::Timeline;
use crate::transform::Dimensions;

pub struct Editor {
    scene: Scene,
    timeline: Timeline,
    driver: AnimationDriver,
    frames: FrameQueue,
    rng: Pcg32,
}

impl Editor {
    /// `fallback_seed` is used when the settings carry no seed
    pub fn new(settings: &EditorSettings, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let scene = if settings.start_with_example {
            example_scene(&mut rng)
        } else {
            Scene::new()
        };
        log::info!("Editor started (seed {}, {} entities)", seed, scene.len());

        Self {
            scene,
            timeline: Timeline::new(settings.default_duration),
            driver: AnimationDriver::new(settings.rotate_by, settings.theme.clone()),
            frames: FrameQueue::new(),
            rng,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Does the host need to call `on_frame` at the next refresh?
    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// The surface was (re)sized
    pub fn resize(&mut self, width: f64, height: f64, ratio: f64) {
        let dims = Dimensions::new(width, height, ratio);
        log::debug!("Resize to {}x{} @{}x", dims.width, dims.height, dims.ratio);
        self.scene = self.scene.with_dimensions(dims);
        self.frames.request();
    }

    /// Pointer click in surface CSS pixels. The hit entity gets a new color.
    ///
    /// Entities are tested in the pose currently on screen.
    pub fn click(&mut self, x: f64, y: f64) -> Option<EntityId> {
        let id = self.driver.pick(&self.scene, DVec2::new(x, y))?;
        log::debug!("Clicked entity {}", id);
        self.scene = recolor_entity(&id, &self.scene, &mut self.rng);
        self.frames.request();
        Some(id)
    }

    /// Append a random rectangle. Fails until the first resize.
    pub fn add_rectangle(&mut self) -> Result<(), EditorError> {
        match add_random_rectangle(&self.scene, &mut self.rng) {
            Ok(scene) => {
                self.scene = scene;
                self.frames.request();
                Ok(())
            }
            Err(e) => {
                log::warn!("Cannot add rectangle: {}", e);
                Err(e.into())
            }
        }
    }

    /// Duration field changed. Always pauses.
    pub fn set_duration(&mut self, duration: f64, now: f64) {
        self.driver.sample(&self.timeline, now);
        self.driver.cancel(&mut self.frames);
        self.timeline = self.timeline.update_duration(duration);
        log::debug!("Duration set to {}s", self.timeline.duration());
        // The redraw tick commits whatever progress playback had reached
        self.frames.request();
    }

    /// Play/pause button
    pub fn toggle_play_pause(&mut self, now: f64) {
        let timeline = self.driver.settle(self.timeline);
        if timeline.is_playing() {
            self.driver.cancel(&mut self.frames);
            self.driver.discard_pending();
        }

        self.timeline = timeline.toggle_play_pause(now);
        if self.timeline.is_playing() {
            log::info!(
                "Playing from {:.3} over {}s",
                self.timeline.progress().unwrap_or(0.0),
                self.timeline.duration()
            );
            self.driver.sample(&self.timeline, now);
            self.driver.schedule(&mut self.frames);
        } else {
            log::info!("Paused at {:.3}", self.timeline.progress().unwrap_or(0.0));
            self.frames.request();
        }
    }

    /// Replace the scene's entities with an imported document. On error the
    /// scene is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<usize, EditorError> {
        let entities = persistence::import_scene(json).inspect_err(|e| {
            log::warn!("Import rejected: {}", e);
        })?;
        let count = entities.len();
        self.scene = self.scene.with_entities(entities);
        self.frames.request();
        log::info!("Imported {} entities", count);
        Ok(count)
    }

    pub fn export(&self) -> Result<ExportedScene, EditorError> {
        let export = persistence::export_scene(&self.scene)?;
        log::info!("Exported {} entities as {}", self.scene.len(), export.filename);
        Ok(export)
    }

    /// Display refresh. Runs a tick if one is due and returns its outcome.
    pub fn on_frame<S: DrawSurface + ?Sized>(
        &mut self,
        now: f64,
        surface: &mut S,
    ) -> Option<TickOutcome> {
        let frame = self.frames.take()?;
        let outcome = self.driver.tick(
            now,
            Some(frame),
            &self.scene,
            &self.timeline,
            surface,
            &mut self.frames,
        );
        match outcome {
            TickOutcome::Committed(timeline) | TickOutcome::Finished(timeline) => {
                self.timeline = timeline;
            }
            TickOutcome::Continue | TickOutcome::Idle => {}
        }
        Some(outcome)
    }

    /// Tear down: no tick may run after this
    pub fn shutdown(&mut self) {
        self.driver.cancel(&mut self.frames);
        self.frames.cancel_all();
        log::debug!("Editor shut down");
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
