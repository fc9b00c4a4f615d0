//! Decorative particle field
//!
//! All sprite mutation lives here. The simulation is single threaded and
//! driven entirely by the caller:
//! - Frame timestamps are the only clock (timers included)
//! - Seeded layout; runtime RNG may be seeded for reproducible runs
//! - Stable iteration order (by sprite ID)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod interaction;
pub mod resize;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use catalog::{LOGO_CATALOG, asset_path};
pub use collision::{PairContact, WallHits, resolve_pair, resolve_walls};
pub use resize::on_resize;
pub use rng::ParkMiller;
pub use spawn::{generate_initial, generate_initial_with_seed, sample_sprite};
pub use state::{Burst, BurstParticle, Field, FieldOptions, FieldTask, Sprite, Viewport};
pub use tick::{StepStats, step};
pub use timers::TaskQueue;
