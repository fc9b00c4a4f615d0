//! Easing curves for the pop and burst transitions

/// Cubic ease-out, input clamped to [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        // Front-loaded
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(1.0, 2.0, 0.5), 1.5);
    }
}
