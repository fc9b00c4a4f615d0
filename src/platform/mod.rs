//! Hosts that drive a `FloatingLogos`
//!
//! - `headless`: synthetic clock, used by the native binary and tests
//! - `web`: DOM elements + requestAnimationFrame (WASM only)

#[cfg(not(target_arch = "wasm32"))]
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;
