//! Pop interaction, burst spawning, respawn and the autoplay hint
//!
//! Everything deferred goes through the field's task queue, so tearing the
//! field down cancels it in one place.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Burst, BurstParticle, Field, FieldTask};
use crate::consts::*;
use crate::from_angle;

impl Field {
    /// Pop a sprite: start its exit transition and a burst at `origin`.
    ///
    /// Returns false (and does nothing) if the sprite is gone, already
    /// popping, or the field has been torn down.
    pub fn pop(&mut self, sprite_id: u32, origin: Vec2, now_ms: f64) -> bool {
        if self.is_torn_down() {
            return false;
        }
        match self.sprite_mut(sprite_id) {
            Some(sprite) if !sprite.is_popping() => sprite.popped_at = Some(now_ms),
            Some(_) => return false,
            None => {
                log::trace!("Pop ignored for unknown sprite {}", sprite_id);
                return false;
            }
        }

        let burst = self.spawn_burst(origin, now_ms);
        let burst_id = burst.id;
        log::debug!(
            "Popped sprite {} at ({:.0}, {:.0}) with {} particles",
            sprite_id,
            origin.x,
            origin.y,
            burst.particles.len()
        );
        self.bursts.push(burst);
        self.tasks.schedule(
            now_ms + BURST_LIFETIME_MS,
            FieldTask::Remove {
                sprite_id,
                burst_id,
            },
        );
        true
    }

    /// Pop using the sprite's own on-screen center as the burst origin
    pub fn pop_center(&mut self, sprite_id: u32, now_ms: f64) -> bool {
        let viewport = self.viewport;
        match self.sprite(sprite_id) {
            Some(sprite) => {
                let origin = sprite.center(&viewport);
                self.pop(sprite_id, origin, now_ms)
            }
            None => false,
        }
    }

    /// Topmost interactive sprite under `point`
    pub fn hit_test(&self, point: Vec2) -> Option<u32> {
        self.sprites
            .iter()
            .rev()
            .filter(|s| !s.is_popping())
            .find(|s| s.center(&self.viewport).distance(point) <= s.radius(&self.viewport))
            .map(|s| s.id)
    }

    fn spawn_burst(&mut self, origin: Vec2, now_ms: f64) -> Burst {
        let count = self
            .rng
            .random_range(BURST_PARTICLES_MIN..=BURST_PARTICLES_MAX);
        let particles = (0..count)
            .map(|_| {
                let angle = self.rng.random::<f32>() * TAU;
                let distance = BURST_DISTANCE_MIN + self.rng.random::<f32>() * BURST_DISTANCE_RANGE;
                let color = PARTICLE_COLORS[self.rng.random_range(0..PARTICLE_COLORS.len())];
                BurstParticle {
                    offset: from_angle(angle, distance),
                    color: color.to_string(),
                }
            })
            .collect();

        Burst {
            id: self.next_burst_id(),
            origin,
            started_at: now_ms,
            particles,
        }
    }

    /// Queue the hint sequence: first pop after a fixed delay, the rest staggered
    pub(crate) fn schedule_hints(&mut self, now_ms: f64) {
        let count = self.rng.random_range(HINT_COUNT_MIN..=HINT_COUNT_MAX);
        let mut due = now_ms + HINT_FIRST_DELAY_MS;
        for _ in 0..count {
            self.tasks.schedule(due, FieldTask::Hint);
            due += self
                .rng
                .random_range(HINT_STAGGER_MIN_MS..HINT_STAGGER_MAX_MS);
        }
        log::debug!("Scheduled {} hint pops", count);
    }

    /// Fire every task due at `now`. Returns how many ran.
    pub fn run_due_tasks(&mut self, now_ms: f64) -> usize {
        if self.is_torn_down() || self.tasks.next_due().is_none_or(|due| due > now_ms) {
            return 0;
        }
        let due = self.tasks.take_due(now_ms);
        let count = due.len();
        for task in due {
            log::trace!("Running {:?}", task);
            self.run_task(task, now_ms);
        }
        count
    }

    fn run_task(&mut self, task: FieldTask, now_ms: f64) {
        match task {
            FieldTask::Remove {
                sprite_id,
                burst_id,
            } => {
                self.bursts.retain(|b| b.id != burst_id);
                let Some(index) = self.sprites.iter().position(|s| s.id == sprite_id) else {
                    return;
                };
                let sprite = self.sprites.remove(index);
                self.schedule_respawn(sprite.name, now_ms);
            }
            FieldTask::Respawn { name } => {
                if self.respawn(&name).is_none() {
                    self.tasks
                        .schedule(now_ms + RESPAWN_RETRY_MS, FieldTask::Respawn { name });
                }
            }
            FieldTask::Hint => self.run_hint(now_ms),
        }
    }

    fn run_hint(&mut self, now_ms: f64) {
        let available: Vec<u32> = self
            .sprites
            .iter()
            .filter(|s| !s.is_popping() && !self.hinted.contains(&s.id))
            .map(|s| s.id)
            .collect();
        if available.is_empty() {
            return;
        }
        let target = available[self.rng.random_range(0..available.len())];
        self.hinted.push(target);
        self.pop_center(target, now_ms);
    }
}
