//! Error types for the logo field.
//!
//! Almost everything in this crate is decorative and fails silently; these
//! cover the few constructors and host hooks that can refuse to proceed.

use std::fmt;

/// Errors surfaced by field construction and the DOM host.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Viewport dimensions were zero, negative or not finite.
    InvalidViewport { width: f32, height: f32 },
    /// A required browser object (window, document, mount element) was missing.
    Dom(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport {}x{}: dimensions must be positive", width, height)
            }
            FieldError::Dom(what) => write!(f, "DOM unavailable: {}", what),
        }
    }
}

impl std::error::Error for FieldError {}
