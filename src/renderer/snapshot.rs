//! Read-only frame snapshots
//!
//! The view layer never touches the field. Each frame it receives sprite
//! transforms and burst particles and draws them however it likes (DOM,
//! canvas, a scene graph).

use serde::Serialize;

use super::easing::{ease_out_cubic, lerp};
use crate::consts::*;
use crate::field::{Burst, Field, Sprite, Viewport};

/// How one sprite should be drawn this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// On-screen diameter (effective size)
    pub size: f32,
    pub opacity: f32,
    pub scale: f32,
    /// False while the pop transition runs
    pub interactive: bool,
    /// Pointer is over this sprite (never true while popping)
    pub hovered: bool,
}

impl SpriteView {
    fn from_sprite(sprite: &Sprite, viewport: &Viewport, now_ms: f64, hovered: Option<u32>) -> Self {
        let is_hovered = !sprite.is_popping() && hovered == Some(sprite.id);
        let (opacity, scale, interactive) = match sprite.popped_at {
            Some(start) => {
                let t = ((now_ms - start) / POP_TRANSITION_MS) as f32;
                let e = ease_out_cubic(t);
                (lerp(sprite.opacity, 0.0, e), lerp(1.0, POP_SCALE, e), false)
            }
            None if is_hovered => (viewport.hover_opacity(), 1.0, true),
            None => (sprite.opacity, 1.0, true),
        };

        Self {
            id: sprite.id,
            name: sprite.name.clone(),
            x: sprite.pos.x,
            y: sprite.pos.y,
            size: sprite.effective_size(viewport),
            opacity,
            scale,
            interactive,
            hovered: is_hovered,
        }
    }
}

/// One burst particle this frame (position is the particle's center)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurstView {
    pub id: u32,
    pub particles: Vec<ParticleView>,
}

impl BurstView {
    fn from_burst(burst: &Burst, now_ms: f64) -> Self {
        let e = ease_out_cubic(burst.progress(now_ms));
        let particles = burst
            .particles
            .iter()
            .map(|p| {
                let pos = burst.origin + p.offset * e;
                ParticleView {
                    x: pos.x,
                    y: pos.y,
                    size: BURST_PARTICLE_SIZE,
                    scale: 1.0 - e,
                    opacity: 1.0 - e,
                    color: p.color.clone(),
                }
            })
            .collect();
        Self {
            id: burst.id,
            particles,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub sprites: Vec<SpriteView>,
    pub bursts: Vec<BurstView>,
}

impl FrameSnapshot {
    pub fn capture(field: &Field, now_ms: f64, hovered: Option<u32>) -> Self {
        let viewport = field.viewport;
        Self {
            sprites: field
                .sprites
                .iter()
                .map(|s| SpriteView::from_sprite(s, &viewport, now_ms, hovered))
                .collect(),
            bursts: field
                .bursts
                .iter()
                .map(|b| BurstView::from_burst(b, now_ms))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sprite(&self, id: u32) -> Option<&SpriteView> {
        self.sprites.iter().find(|s| s.id == id)
    }
}
