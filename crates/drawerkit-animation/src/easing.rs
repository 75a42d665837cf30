//! Interpolation helpers for settle animations.

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Quintic ease-out: `(t - 1)^5 + 1`.
///
/// Starts fast and decelerates into the target, which reads as the tail of a
/// fling. Input outside `[0, 1]` is clamped.
pub fn ease_out_quintic(fraction: f32) -> f32 {
    let t = fraction.clamp(0.0, 1.0) - 1.0;
    t * t * t * t * t + 1.0
}
