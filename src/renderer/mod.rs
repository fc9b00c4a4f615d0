//! Frame snapshot module
//!
//! The field hands the view layer a read-only snapshot each frame.

pub mod easing;
pub mod snapshot;

pub use snapshot::{BurstView, FrameSnapshot, ParticleView, SpriteView};
