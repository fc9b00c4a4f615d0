//! Sprite generation
//!
//! The initial layout comes from the seeded Park–Miller stream so it is the
//! same on every visit; respawns draw from the field's runtime RNG.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::catalog;
use super::rng::ParkMiller;
use super::state::{Field, FieldTask, Sprite, Viewport};
use crate::consts::*;
use crate::from_angle;

/// Sample one sprite: size, heading, speed, then position
pub fn sample_sprite<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    name: &str,
    viewport: &Viewport,
) -> Sprite {
    let size = SIZE_MIN + rng.random::<f32>() * SIZE_RANGE;
    let angle = rng.random::<f32>() * TAU;
    let speed = BASE_SPEED * (0.5 + rng.random::<f32>());
    let x = rng.random::<f32>() * (viewport.width - size).max(0.0);
    let y = rng.random::<f32>() * (viewport.height - size).max(0.0);

    Sprite {
        id,
        name: name.to_string(),
        pos: Vec2::new(x, y),
        vel: from_angle(angle, speed),
        size,
        opacity: 0.0,
        popped_at: None,
    }
}

/// Initial field for `viewport` using the fixed layout seed
pub fn generate_initial(viewport: &Viewport) -> Vec<Sprite> {
    generate_initial_with_seed(viewport, LAYOUT_SEED)
}

/// Initial field from an explicit seed. Empty when the viewport is unusable.
pub fn generate_initial_with_seed(viewport: &Viewport, seed: u32) -> Vec<Sprite> {
    if !viewport.is_valid() {
        log::debug!(
            "Skipping layout for invalid viewport {}x{}",
            viewport.width,
            viewport.height
        );
        return Vec::new();
    }

    let mut rng = ParkMiller::new(seed);
    let names = catalog::shuffled(&mut rng);

    (0..LOGO_COUNT)
        .map(|i| sample_sprite(&mut rng, i as u32, names[i % names.len()], viewport))
        .collect()
}

impl Field {
    /// Add a fresh sprite carrying `name`. Returns its id, or None when the
    /// field is torn down or has no valid viewport.
    pub fn respawn(&mut self, name: &str) -> Option<u32> {
        if self.is_torn_down() || !self.viewport.is_valid() {
            return None;
        }
        let id = self.next_sprite_id();
        let viewport = self.viewport;
        let mut sprite = sample_sprite(&mut self.rng, id, name, &viewport);
        sprite.opacity = viewport.base_opacity();
        self.sprites.push(sprite);
        self.normalize_order();
        log::debug!("Respawned {} as sprite {}", name, id);
        Some(id)
    }

    /// Schedule a respawn of `name` after the randomized delay
    pub(crate) fn schedule_respawn(&mut self, name: String, now_ms: f64) {
        let delay = self
            .rng
            .random_range(RESPAWN_DELAY_MIN_MS..RESPAWN_DELAY_MAX_MS);
        self.tasks.schedule(now_ms + delay, FieldTask::Respawn { name });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::state::FieldOptions;

    #[test]
    fn test_generate_initial_deterministic() {
        let vp = Viewport::new(1024.0, 768.0);
        let a = generate_initial(&vp);
        let b = generate_initial(&vp);
        assert_eq!(a.len(), LOGO_COUNT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_layout() {
        let vp = Viewport::new(1024.0, 768.0);
        let a = generate_initial_with_seed(&vp, 42);
        let b = generate_initial_with_seed(&vp, 7);
        assert_ne!(a, b);
    }

    #[test]
    fn test_initial_sprites_sampled_in_range() {
        let vp = Viewport::new(1024.0, 768.0);
        for (i, s) in generate_initial(&vp).iter().enumerate() {
            assert_eq!(s.id, i as u32);
            assert!(s.size >= SIZE_MIN && s.size < SIZE_MIN + SIZE_RANGE);
            let speed = s.vel.length();
            assert!(speed >= BASE_SPEED * 0.5 - 1e-3 && speed <= BASE_SPEED * 1.5 + 1e-3);
            assert!(s.pos.x >= 0.0 && s.pos.x + s.size <= vp.width);
            assert!(s.pos.y >= 0.0 && s.pos.y + s.size <= vp.height);
            assert_eq!(s.opacity, 0.0);
        }
    }

    #[test]
    fn test_initial_names_unique_when_count_below_catalog() {
        let vp = Viewport::new(1024.0, 768.0);
        let sprites = generate_initial(&vp);
        let mut names: Vec<_> = sprites.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LOGO_COUNT);
    }

    #[test]
    fn test_invalid_viewport_skips_layout() {
        assert!(generate_initial(&Viewport::new(0.0, 768.0)).is_empty());
    }

    #[test]
    fn test_respawn_assigns_fresh_id() {
        let mut field = Field::new(Viewport::new(1024.0, 768.0), 0.0, &FieldOptions::seeded(9));
        let id = field.respawn("spotify").unwrap();
        assert!(id >= LOGO_COUNT as u32);
        assert_eq!(field.len(), LOGO_COUNT + 1);
        let sprite = field.sprite(id).unwrap();
        assert_eq!(sprite.name, "spotify");
        assert!(sprite.in_bounds(&field.viewport));
        assert_eq!(sprite.opacity, BASE_OPACITY);

        let second = field.respawn("spotify").unwrap();
        assert_ne!(id, second);
    }

    #[test]
    fn test_respawn_noop_without_viewport() {
        let mut field = Field::new(Viewport::new(1024.0, 768.0), 0.0, &FieldOptions::seeded(9));
        field.viewport = Viewport::new(0.0, 0.0);
        assert_eq!(field.respawn("spotify"), None);
        assert_eq!(field.len(), LOGO_COUNT);
    }
}
