//! Collision response for sprites
//!
//! Walls reflect; sprite pairs are circles that swap the normal component of
//! their velocities (equal masses) and are pushed apart by half the overlap each.

use glam::Vec2;

use super::state::{Sprite, Viewport};

/// Which walls a sprite touched this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Clamp a sprite to the viewport edges and point its velocity back inside
pub fn resolve_walls(sprite: &mut Sprite, viewport: &Viewport) -> WallHits {
    let s = sprite.effective_size(viewport);
    let mut hits = WallHits::default();

    if sprite.pos.x < 0.0 {
        sprite.pos.x = 0.0;
        sprite.vel.x = sprite.vel.x.abs();
        hits.left = true;
    }
    if sprite.pos.y < 0.0 {
        sprite.pos.y = 0.0;
        sprite.vel.y = sprite.vel.y.abs();
        hits.top = true;
    }
    if sprite.pos.x + s > viewport.width {
        sprite.pos.x = (viewport.width - s).max(0.0);
        sprite.vel.x = -sprite.vel.x.abs();
        hits.right = true;
    }
    if sprite.pos.y + s > viewport.height {
        sprite.pos.y = (viewport.height - s).max(0.0);
        sprite.vel.y = -sprite.vel.y.abs();
        hits.bottom = true;
    }

    hits
}

/// Result of a pair check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    /// Unit normal from `a` toward `b`
    pub normal: Vec2,
    /// How far the circles overlapped before separation
    pub overlap: f32,
    /// Whether velocities were exchanged (only when approaching)
    pub exchanged: bool,
}

/// Resolve contact between two sprites, if any
///
/// Coincident centers have no normal and are left alone.
pub fn resolve_pair(a: &mut Sprite, b: &mut Sprite, viewport: &Viewport) -> Option<PairContact> {
    let ra = a.radius(viewport);
    let rb = b.radius(viewport);
    let delta = (b.pos + Vec2::splat(rb)) - (a.pos + Vec2::splat(ra));
    let dist = delta.length();
    let min_dist = ra + rb;

    if dist >= min_dist || dist <= 0.0 {
        return None;
    }

    let normal = delta / dist;
    // Relative velocity along the normal; positive means closing
    let dvn = (a.vel - b.vel).dot(normal);
    let exchanged = dvn > 0.0;
    if exchanged {
        a.vel -= normal * dvn;
        b.vel += normal * dvn;
    }

    let overlap = min_dist - dist;
    let correction = normal * (overlap * 0.5);
    a.pos -= correction;
    b.pos += correction;

    Some(PairContact {
        normal,
        overlap,
        exchanged,
    })
}

/// Two distinct mutable elements of a slice
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
