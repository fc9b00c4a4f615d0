//! Field state and core simulation types
//!
//! The Field exclusively owns its sprites, bursts and pending tasks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use super::timers::TaskQueue;
use crate::clamp_lenient;
use crate::consts::*;
use crate::error::FieldError;

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn try_new(width: f32, height: f32) -> Result<Self, FieldError> {
        let viewport = Self::new(width, height);
        if viewport.is_valid() {
            Ok(viewport)
        } else {
            Err(FieldError::InvalidViewport { width, height })
        }
    }

    /// Both dimensions finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.width <= MOBILE_BREAKPOINT
    }

    /// On-screen scale applied to sprite sizes
    #[inline]
    pub fn size_factor(&self) -> f32 {
        if self.is_mobile() { MOBILE_SCALE } else { 1.0 }
    }

    pub fn base_opacity(&self) -> f32 {
        if self.is_mobile() {
            MOBILE_BASE_OPACITY
        } else {
            BASE_OPACITY
        }
    }

    pub fn hover_opacity(&self) -> f32 {
        if self.is_mobile() {
            MOBILE_HOVER_OPACITY
        } else {
            HOVER_OPACITY
        }
    }
}

/// One bouncing logo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: u32,
    pub name: String,
    /// Top-left corner, pixels from the viewport's top-left
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Diameter at desktop scale
    pub size: f32,
    pub opacity: f32,
    /// Frame timestamp at which a pop began
    #[serde(default)]
    pub popped_at: Option<f64>,
}

impl Sprite {
    #[inline]
    pub fn effective_size(&self, viewport: &Viewport) -> f32 {
        self.size * viewport.size_factor()
    }

    #[inline]
    pub fn radius(&self, viewport: &Viewport) -> f32 {
        self.effective_size(viewport) / 2.0
    }

    /// Center of the on-screen box
    pub fn center(&self, viewport: &Viewport) -> Vec2 {
        self.pos + Vec2::splat(self.radius(viewport))
    }

    #[inline]
    pub fn is_popping(&self) -> bool {
        self.popped_at.is_some()
    }

    /// Largest allowed top-left corner
    pub fn max_pos(&self, viewport: &Viewport) -> Vec2 {
        let s = self.effective_size(viewport);
        Vec2::new(
            (viewport.width - s).max(0.0),
            (viewport.height - s).max(0.0),
        )
    }

    /// Box fully inside the viewport (oversized sprites pinned at the origin count)
    pub fn in_bounds(&self, viewport: &Viewport) -> bool {
        let max = self.max_pos(viewport);
        self.pos.x >= 0.0 && self.pos.y >= 0.0 && self.pos.x <= max.x && self.pos.y <= max.y
    }

    /// Pull the position back into bounds without touching velocity
    pub fn clamp_into(&mut self, viewport: &Viewport) {
        let max = self.max_pos(viewport);
        self.pos.x = clamp_lenient(self.pos.x, 0.0, max.x);
        self.pos.y = clamp_lenient(self.pos.y, 0.0, max.y);
    }
}

/// One outward-moving particle of a burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstParticle {
    /// Final displacement from the burst origin
    pub offset: Vec2,
    pub color: String,
}

/// Short-lived particle explosion left behind by a pop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub id: u32,
    pub origin: Vec2,
    pub started_at: f64,
    pub particles: Vec<BurstParticle>,
}

impl Burst {
    /// Linear progress through the lifetime, 0..=1
    pub fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.started_at) / BURST_LIFETIME_MS).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.started_at >= BURST_LIFETIME_MS
    }
}

/// Deferred work owned by the field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTask {
    /// End of a pop: drop the sprite and its burst, schedule the respawn
    Remove { sprite_id: u32, burst_id: u32 },
    /// Bring a popped logo back under a fresh id
    Respawn { name: String },
    /// Automatic pop advertising the interaction
    Hint,
}

/// Knobs the host may set when creating a field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// Run the autoplay hint sequence
    pub autoplay_hint: bool,
    /// Fixed seed for the runtime RNG (respawns, bursts, hints); OS-seeded when None
    pub rng_seed: Option<u64>,
}

impl FieldOptions {
    /// Reproducible options for tests and headless runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            autoplay_hint: false,
            rng_seed: Some(seed),
        }
    }
}

/// The live set of sprites and bursts
#[derive(Debug, Clone)]
pub struct Field {
    pub viewport: Viewport,
    /// Sorted by id for stable iteration
    pub sprites: Vec<Sprite>,
    pub bursts: Vec<Burst>,
    /// Frame timestamp the field was created at (fade-in origin)
    pub created_at: f64,
    pub(crate) tasks: TaskQueue<FieldTask>,
    /// Sprites already targeted by the current hint sequence
    pub(crate) hinted: Vec<u32>,
    pub(crate) rng: Pcg32,
    pub(crate) fade_done: bool,
    torn_down: bool,
    next_sprite_id: u32,
    next_burst_id: u32,
}

impl Field {
    /// Populate a field with the seeded initial layout
    pub fn new(viewport: Viewport, now_ms: f64, options: &FieldOptions) -> Self {
        let sprites = spawn::generate_initial(&viewport);
        let rng = match options.rng_seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };

        let mut field = Self {
            viewport,
            sprites,
            bursts: Vec::new(),
            created_at: now_ms,
            tasks: TaskQueue::new(),
            hinted: Vec::new(),
            rng,
            fade_done: false,
            torn_down: false,
            next_sprite_id: LOGO_COUNT as u32,
            next_burst_id: 0,
        };

        if options.autoplay_hint {
            field.schedule_hints(now_ms);
        }

        log::info!(
            "Field created: {} sprites in {}x{}",
            field.sprites.len(),
            viewport.width,
            viewport.height
        );
        field
    }

    /// Allocate a fresh sprite id
    pub fn next_sprite_id(&mut self) -> u32 {
        let id = self.next_sprite_id;
        self.next_sprite_id += 1;
        id
    }

    pub(crate) fn next_burst_id(&mut self) -> u32 {
        let id = self.next_burst_id;
        self.next_burst_id += 1;
        id
    }

    pub fn sprite(&self, id: u32) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub fn sprite_mut(&mut self, id: u32) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Number of timers still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Stop the field for good: cancel every pending task
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let cancelled = self.tasks.cancel_all();
        self.torn_down = true;
        log::debug!("Field torn down, {} pending tasks cancelled", cancelled);
    }

    /// Ramp sprite opacity up over the first second
    pub fn apply_fade(&mut self, now_ms: f64) {
        if self.fade_done {
            return;
        }
        let t = ((now_ms - self.created_at) / FADE_IN_MS).clamp(0.0, 1.0) as f32;
        let opacity = self.viewport.base_opacity() * t;
        for sprite in &mut self.sprites {
            sprite.opacity = opacity;
        }
        if t >= 1.0 {
            self.fade_done = true;
        }
    }

    /// Ensure sprites are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.sprites.sort_by_key(|s| s.id);
    }
}
