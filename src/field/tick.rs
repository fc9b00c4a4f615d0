//! Per-frame integration step
//!
//! Move, bounce off walls, resolve sprite pairs, then clamp back into bounds.

use super::collision::{pair_mut, resolve_pair, resolve_walls};
use super::state::Field;
use crate::consts::MAX_DT;

/// Counters from one step (handy for logging and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub wall_hits: u32,
    pub contacts: u32,
}

/// Advance the field by `dt` seconds
pub fn step(field: &mut Field, dt: f32) -> StepStats {
    let mut stats = StepStats::default();
    if field.is_torn_down() || !field.viewport.is_valid() {
        return stats;
    }

    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
    let viewport = field.viewport;

    for sprite in &mut field.sprites {
        sprite.pos += sprite.vel * dt;
        if resolve_walls(sprite, &viewport).any() {
            stats.wall_hits += 1;
        }
    }

    // O(n²) over a small fixed count; popping sprites collide until removed
    let n = field.sprites.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = pair_mut(&mut field.sprites, i, j);
            if resolve_pair(a, b, &viewport).is_some() {
                stats.contacts += 1;
            }
        }
    }

    // Separation may have nudged a sprite past an edge
    for sprite in &mut field.sprites {
        sprite.clamp_into(&viewport);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LOGO_COUNT;
    use crate::field::state::{FieldOptions, Sprite, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    fn field_1024() -> Field {
        Field::new(Viewport::new(1024.0, 768.0), 0.0, &FieldOptions::seeded(11))
    }

    fn lone_sprite(field: &mut Field, x: f32, y: f32, vx: f32, vy: f32) {
        field.sprites = vec![Sprite {
            id: 0,
            name: "hulu".into(),
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size: 40.0,
            opacity: 0.0,
            popped_at: None,
        }];
    }

    #[test]
    fn test_ten_seconds_stays_in_bounds() {
        let mut field = field_1024();
        assert_eq!(field.len(), LOGO_COUNT);
        for _ in 0..600 {
            step(&mut field, 1.0 / 60.0);
            assert_eq!(field.len(), LOGO_COUNT);
            for s in &field.sprites {
                assert!(s.in_bounds(&field.viewport), "sprite {} out of bounds: {:?}", s.id, s.pos);
            }
        }
    }

    #[test]
    fn test_wall_reflection_at_left_edge() {
        let mut field = field_1024();
        lone_sprite(&mut field, 0.1, 300.0, -18.0, 0.0);
        step(&mut field, 1.0 / 60.0);
        let s = &field.sprites[0];
        assert_eq!(s.pos.x, 0.0);
        assert_eq!(s.vel.x, 18.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut field = field_1024();
        lone_sprite(&mut field, 500.0, 300.0, 10.0, 0.0);
        step(&mut field, 5.0);
        assert!((field.sprites[0].pos.x - 500.5).abs() < 1e-3);

        step(&mut field, -1.0);
        assert!((field.sprites[0].pos.x - 500.5).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_viewport_skips_step() {
        let mut field = field_1024();
        lone_sprite(&mut field, 500.0, 300.0, 10.0, 0.0);
        field.viewport = Viewport::new(0.0, 768.0);
        step(&mut field, 0.016);
        assert_eq!(field.sprites[0].pos.x, 500.0);
    }

    #[test]
    fn test_popping_sprite_still_collides() {
        let mut field = field_1024();
        lone_sprite(&mut field, 100.0, 100.0, 10.0, 0.0);
        let mut other = field.sprites[0].clone();
        other.id = 1;
        other.pos.x = 130.0;
        other.vel.x = -10.0;
        other.popped_at = Some(0.0);
        field.sprites.push(other);

        let stats = step(&mut field, 0.0);
        assert_eq!(stats.contacts, 1);
        assert!((field.sprites[0].pos.x - 95.0).abs() < 1e-4);
        assert!((field.sprites[1].pos.x - 135.0).abs() < 1e-4);
        assert!((field.sprites[0].vel.x + 10.0).abs() < 1e-4);
        assert!((field.sprites[1].vel.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_total_momentum_conserved_away_from_walls() {
        let mut field = field_1024();
        lone_sprite(&mut field, 300.0, 300.0, 15.0, 3.0);
        let mut other = field.sprites[0].clone();
        other.id = 1;
        other.pos = Vec2::new(335.0, 305.0);
        other.vel = Vec2::new(-12.0, -4.0);
        field.sprites.push(other);

        let before: Vec2 = field.sprites.iter().map(|s| s.vel).sum();
        let stats = step(&mut field, 1.0 / 60.0);
        let after: Vec2 = field.sprites.iter().map(|s| s.vel).sum();
        assert_eq!(stats.contacts, 1);
        assert!((before - after).length() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_step_keeps_bounds(seed in 0u64..500, frames in 1usize..120, w in 200.0f32..2000.0, h in 200.0f32..1400.0) {
            let mut field = Field::new(Viewport::new(w, h), 0.0, &FieldOptions::seeded(seed));
            for _ in 0..frames {
                step(&mut field, 1.0 / 60.0);
            }
            for s in &field.sprites {
                prop_assert!(s.in_bounds(&field.viewport));
            }
        }
    }
}
