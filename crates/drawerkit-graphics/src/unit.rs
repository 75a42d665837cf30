//! Unit types: Dp and conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density
    }

    /// Converts to whole pixels, rounding half up the way platform
    /// `ViewConfiguration` scaling does.
    pub fn round_to_px(&self, density: f32) -> f32 {
        (self.0 * density + 0.5).floor()
    }

    pub fn from_px(px: f32, density: f32) -> Self {
        if density == 0.0 {
            return Self(0.0);
        }
        Self(px / density)
    }
}
