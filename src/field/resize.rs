//! Viewport resize handling

use super::state::{Field, Viewport};
use crate::clamp_lenient;

/// Rescale sprite positions from `old` to `new` proportionally.
///
/// Equal dimensions are a no-op. An unusable `old` viewport leaves nothing to
/// scale from, so positions are only clamped; an unusable `new` one is
/// recorded and positions wait for a real size.
pub fn on_resize(field: &mut Field, old: Viewport, new: Viewport) {
    if old == new {
        return;
    }
    field.viewport = new;
    if !new.is_valid() {
        log::debug!("Resize to invalid viewport {}x{}, layout paused", new.width, new.height);
        return;
    }

    if !old.is_valid() {
        for sprite in &mut field.sprites {
            sprite.clamp_into(&new);
        }
        return;
    }

    for sprite in &mut field.sprites {
        let max = sprite.max_pos(&new);
        sprite.pos.x = clamp_lenient(sprite.pos.x / old.width * new.width, 0.0, max.x);
        sprite.pos.y = clamp_lenient(sprite.pos.y / old.height * new.height, 0.0, max.y);
    }
    log::debug!(
        "Resized field {}x{} -> {}x{}",
        old.width,
        old.height,
        new.width,
        new.height
    );
}

impl Field {
    /// Resize against the field's current viewport
    pub fn resize_to(&mut self, new: Viewport) {
        let old = self.viewport;
        on_resize(self, old, new);
    }
}
