//! Floating Logos - decorative bouncing-logo field for the landing page
//!
//! Core modules:
//! - `field`: Simulation (spawn, integrate, collide, pop, respawn, resize)
//! - `app`: The owned simulation object a mounted view drives each frame
//! - `renderer`: Read-only frame snapshots for whatever draws them
//! - `platform`: Browser DOM host / native headless driver
//! - `settings`: Viewer preferences (LocalStorage on web)

pub mod app;
pub mod error;
pub mod field;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use app::{FloatingLogos, Lifecycle};
pub use error::FieldError;
pub use settings::Settings;

use glam::Vec2;

/// Field configuration constants
pub mod consts {
    /// Number of sprites in a freshly generated field
    pub const LOGO_COUNT: usize = 30;
    /// Seed for the initial layout (same seed, same layout)
    pub const LAYOUT_SEED: u32 = 42;

    /// Base sprite speed (pixels/s), scaled per sprite by [0.5, 1.5)
    pub const BASE_SPEED: f32 = 18.0;
    /// Sprite diameter range (pixels)
    pub const SIZE_MIN: f32 = 36.0;
    pub const SIZE_RANGE: f32 = 24.0;

    /// Integrator step is capped so a stalled tab doesn't teleport sprites
    pub const MAX_DT: f32 = 0.05;

    /// Viewports at or below this width are "mobile"
    pub const MOBILE_BREAKPOINT: f32 = 768.0;
    /// Size/opacity scale on mobile viewports
    pub const MOBILE_SCALE: f32 = 0.7;

    /// Idle opacity (desktop / mobile)
    pub const BASE_OPACITY: f32 = 0.06;
    pub const MOBILE_BASE_OPACITY: f32 = 0.04;
    /// Opacity while the pointer is over a sprite (desktop / mobile)
    pub const HOVER_OPACITY: f32 = 0.15;
    pub const MOBILE_HOVER_OPACITY: f32 = 0.1;

    /// Fade-in of the initial field (ms)
    pub const FADE_IN_MS: f64 = 1000.0;

    /// Particles per burst (inclusive range)
    pub const BURST_PARTICLES_MIN: u32 = 8;
    pub const BURST_PARTICLES_MAX: u32 = 12;
    /// Particle travel distance (pixels)
    pub const BURST_DISTANCE_MIN: f32 = 40.0;
    pub const BURST_DISTANCE_RANGE: f32 = 60.0;
    /// Particle diameter (pixels)
    pub const BURST_PARTICLE_SIZE: f32 = 8.0;
    /// Burst lifetime; the popped sprite is removed at the same moment (ms)
    pub const BURST_LIFETIME_MS: f64 = 500.0;
    /// Popped sprite fade/scale transition (ms)
    pub const POP_TRANSITION_MS: f64 = 400.0;
    /// Scale a popped sprite grows to
    pub const POP_SCALE: f32 = 2.0;

    /// Respawn delay after removal (ms)
    pub const RESPAWN_DELAY_MIN_MS: f64 = 5000.0;
    pub const RESPAWN_DELAY_MAX_MS: f64 = 30000.0;
    /// Retry delay when a respawn finds no valid viewport (ms)
    pub const RESPAWN_RETRY_MS: f64 = 1000.0;

    /// Number of automatic hint pops (inclusive range)
    pub const HINT_COUNT_MIN: u32 = 3;
    pub const HINT_COUNT_MAX: u32 = 4;
    /// First hint fires this long after the field is created (ms)
    pub const HINT_FIRST_DELAY_MS: f64 = 3000.0;
    /// Gap between hints (ms)
    pub const HINT_STAGGER_MIN_MS: f64 = 3000.0;
    pub const HINT_STAGGER_MAX_MS: f64 = 7000.0;

    /// Burst particle palette
    pub const PARTICLE_COLORS: [&str; 6] = [
        "#FF6B6B", "#4ECDC4", "#45B7D1", "#96E6A1", "#FFD93D", "#C9B1FF",
    ];
}

/// Convert a polar direction (angle, magnitude) to a vector
#[inline]
pub fn from_angle(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * magnitude
}

/// Clamp that tolerates `max < min` (an oversized sprite pins to `min`)
#[inline]
pub fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
