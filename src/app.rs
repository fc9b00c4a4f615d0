//! The owned simulation object
//!
//! One `FloatingLogos` per mounted view. The host calls `start`, then
//! `frame` from its animation-frame callback, forwards pointer events, and
//! calls `stop` on unmount.

use glam::Vec2;

use crate::consts::MAX_DT;
use crate::field::{Field, Viewport, step};
use crate::renderer::FrameSnapshot;
use crate::settings::Settings;

/// Where the instance is in its mount/unmount cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, `start` not called yet
    Idle,
    /// Started, waiting for a usable viewport
    Pending,
    /// Field populated and animating
    Running,
    /// Torn down; every call is a no-op
    Stopped,
}

/// Drives one field from frame timestamps and pointer events
#[derive(Debug)]
pub struct FloatingLogos {
    settings: Settings,
    lifecycle: Lifecycle,
    field: Option<Field>,
    /// Timestamp of the previous frame
    last_frame: Option<f64>,
    hovered: Option<u32>,
    frames: u64,
}

impl FloatingLogos {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            lifecycle: Lifecycle::Idle,
            field: None,
            last_frame: None,
            hovered: None,
            frames: 0,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    /// Mount: populate the field if the viewport is usable, else wait for one
    pub fn start(&mut self, now_ms: f64, width: f32, height: f32) {
        match self.lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Pending | Lifecycle::Running => {
                log::warn!("FloatingLogos already started");
                return;
            }
            Lifecycle::Stopped => {
                log::warn!("FloatingLogos cannot restart after stop");
                return;
            }
        }
        if !self.settings.enabled {
            log::info!("Floating logos disabled in settings");
            self.lifecycle = Lifecycle::Stopped;
            return;
        }

        self.lifecycle = Lifecycle::Pending;
        self.try_populate(now_ms, width, height);
    }

    fn try_populate(&mut self, now_ms: f64, width: f32, height: f32) {
        match Viewport::try_new(width, height) {
            Ok(viewport) => {
                self.field = Some(Field::new(viewport, now_ms, &self.settings.field_options()));
                self.lifecycle = Lifecycle::Running;
                log::info!("Floating logos running");
            }
            Err(e) => log::debug!("{}; waiting", e),
        }
    }

    /// Unmount: tear down the field and cancel everything it scheduled
    pub fn stop(&mut self) {
        if let Some(mut field) = self.field.take() {
            field.teardown();
        }
        if self.lifecycle != Lifecycle::Stopped {
            log::info!("Floating logos stopped after {} frames", self.frames);
        }
        self.lifecycle = Lifecycle::Stopped;
        self.hovered = None;
    }

    /// Event-driven resize. Only real dimension changes reach the field;
    /// while pending the next frame picks the size up.
    pub fn resize(&mut self, width: f32, height: f32) {
        let new = Viewport::new(width, height);
        if let Some(field) = self.field.as_mut() {
            if field.viewport != new {
                field.resize_to(new);
            }
        }
    }

    /// Advance one animation frame and return what to draw
    pub fn frame(&mut self, now_ms: f64, width: f32, height: f32) -> FrameSnapshot {
        match self.lifecycle {
            Lifecycle::Idle | Lifecycle::Stopped => return FrameSnapshot::empty(),
            Lifecycle::Pending => {
                self.try_populate(now_ms, width, height);
                if self.lifecycle != Lifecycle::Running {
                    return FrameSnapshot::empty();
                }
            }
            Lifecycle::Running => self.resize(width, height),
        }

        let dt = match self.last_frame {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_DT as f64) as f32,
            None => 0.0,
        };
        self.last_frame = Some(now_ms);
        self.frames += 1;

        let reduced_motion = self.settings.reduced_motion;
        let Some(field) = self.field.as_mut() else {
            return FrameSnapshot::empty();
        };
        field.apply_fade(now_ms);
        field.run_due_tasks(now_ms);
        if !reduced_motion {
            step(field, dt);
        }
        FrameSnapshot::capture(field, now_ms, self.hovered)
    }

    /// Pointer entered (`Some`) or left (`None`) a sprite
    pub fn set_hovered(&mut self, sprite_id: Option<u32>) {
        self.hovered = sprite_id;
    }

    pub fn hovered(&self) -> Option<u32> {
        self.hovered
    }

    /// Click on a sprite: pop it from its center
    pub fn click(&mut self, sprite_id: u32, now_ms: f64) -> bool {
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        let popped = field.pop_center(sprite_id, now_ms);
        if popped && self.hovered == Some(sprite_id) {
            self.hovered = None;
        }
        popped
    }

    /// Click at a point (canvas hosts): pop whatever sprite is under it
    pub fn click_at(&mut self, x: f32, y: f32, now_ms: f64) -> Option<u32> {
        let field = self.field.as_mut()?;
        let id = field.hit_test(Vec2::new(x, y))?;
        field.pop_center(id, now_ms).then_some(id)
    }
}

impl Drop for FloatingLogos {
    fn drop(&mut self) {
        if let Some(field) = self.field.as_mut() {
            field.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn quiet() -> Settings {
        Settings {
            autoplay_hint: false,
            ..Default::default()
        }
    }

    fn running() -> FloatingLogos {
        let mut logos = FloatingLogos::new(quiet());
        logos.start(0.0, 1024.0, 768.0);
        logos
    }

    #[test]
    fn test_lifecycle() {
        let mut logos = FloatingLogos::new(quiet());
        assert_eq!(logos.lifecycle(), Lifecycle::Idle);
        assert!(logos.frame(0.0, 1024.0, 768.0).sprites.is_empty());

        logos.start(0.0, 1024.0, 768.0);
        assert_eq!(logos.lifecycle(), Lifecycle::Running);
        assert_eq!(logos.frame(16.0, 1024.0, 768.0).sprites.len(), LOGO_COUNT);

        logos.stop();
        assert_eq!(logos.lifecycle(), Lifecycle::Stopped);
        assert!(logos.field().is_none());
        assert!(logos.frame(32.0, 1024.0, 768.0).sprites.is_empty());
        assert!(!logos.click(0, 40.0));
    }

    #[test]
    fn test_pending_until_viewport_valid() {
        let mut logos = FloatingLogos::new(quiet());
        logos.start(0.0, 0.0, 0.0);
        assert_eq!(logos.lifecycle(), Lifecycle::Pending);
        assert!(logos.frame(16.0, 0.0, 768.0).sprites.is_empty());

        let snap = logos.frame(32.0, 1024.0, 768.0);
        assert_eq!(logos.lifecycle(), Lifecycle::Running);
        assert_eq!(snap.sprites.len(), LOGO_COUNT);
    }

    #[test]
    fn test_disabled_never_runs() {
        let mut logos = FloatingLogos::new(Settings {
            enabled: false,
            ..Default::default()
        });
        logos.start(0.0, 1024.0, 768.0);
        assert_eq!(logos.lifecycle(), Lifecycle::Stopped);
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut logos = running();
        // Zero dt: overlapping pairs still separate, nothing integrates
        let mut expected = logos.field().unwrap().clone();
        step(&mut expected, 0.0);

        logos.frame(5000.0, 1024.0, 768.0);
        let after: Vec<_> = logos.field().unwrap().sprites.iter().map(|s| s.pos).collect();
        let want: Vec<_> = expected.sprites.iter().map(|s| s.pos).collect();
        assert_eq!(after, want);
    }

    #[test]
    fn test_fade_in_over_first_second() {
        let mut logos = running();
        let early = logos.frame(0.0, 1024.0, 768.0);
        assert_eq!(early.sprites[0].opacity, 0.0);
        let mid = logos.frame(500.0, 1024.0, 768.0);
        assert!((mid.sprites[0].opacity - BASE_OPACITY * 0.5).abs() < 1e-6);
        let done = logos.frame(1200.0, 1024.0, 768.0);
        assert!((done.sprites[0].opacity - BASE_OPACITY).abs() < 1e-6);
    }

    #[test]
    fn test_frame_detects_resize() {
        let mut logos = running();
        logos.frame(0.0, 1024.0, 768.0);
        logos.frame(16.0, 500.0, 400.0);
        let field = logos.field().unwrap();
        assert_eq!(field.viewport, Viewport::new(500.0, 400.0));
        assert!(field.sprites.iter().all(|s| s.in_bounds(&field.viewport)));
    }

    #[test]
    fn test_click_pops_and_respawns_through_frames() {
        let mut logos = running();
        logos.frame(0.0, 1024.0, 768.0);
        logos.set_hovered(Some(5));
        assert!(logos.click(5, 10.0));
        assert_eq!(logos.hovered(), None);
        assert!(!logos.click(5, 20.0));

        let snap = logos.frame(16.0, 1024.0, 768.0);
        assert_eq!(snap.bursts.len(), 1);
        assert!(!snap.sprite(5).unwrap().interactive);

        let snap = logos.frame(16.0 + BURST_LIFETIME_MS, 1024.0, 768.0);
        assert!(snap.sprite(5).is_none());
        assert!(snap.bursts.is_empty());
        assert_eq!(snap.sprites.len(), LOGO_COUNT - 1);

        let snap = logos.frame(16.0 + BURST_LIFETIME_MS + RESPAWN_DELAY_MAX_MS, 1024.0, 768.0);
        assert_eq!(snap.sprites.len(), LOGO_COUNT);
    }

    #[test]
    fn test_stop_cancels_hints() {
        let mut logos = FloatingLogos::new(Settings::default());
        logos.start(0.0, 1024.0, 768.0);
        assert!(logos.field().unwrap().pending_tasks() > 0);
        logos.stop();
        // A frame far in the future does nothing once stopped
        assert!(logos.frame(60_000.0, 1024.0, 768.0).bursts.is_empty());
    }

    #[test]
    fn test_reduced_motion_freezes() {
        let mut logos = FloatingLogos::new(Settings {
            reduced_motion: true,
            ..Default::default()
        });
        logos.start(0.0, 1024.0, 768.0);
        assert_eq!(logos.field().unwrap().pending_tasks(), 0);
        let before = logos.field().unwrap().sprites[0].pos;
        logos.frame(0.0, 1024.0, 768.0);
        logos.frame(16.0, 1024.0, 768.0);
        assert_eq!(logos.field().unwrap().sprites[0].pos, before);
    }

    #[test]
    fn test_click_at_hits_sprite_center() {
        let mut logos = running();
        let field = logos.field().unwrap();
        let vp = field.viewport;
        let last = field.sprites.last().unwrap();
        let center = last.center(&vp);
        let hit = logos.click_at(center.x, center.y, 0.0);
        assert!(hit.is_some());
        assert_eq!(logos.click_at(-100.0, -100.0, 0.0), None);
    }
}
