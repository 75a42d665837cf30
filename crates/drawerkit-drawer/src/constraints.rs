//! Measurement constraints handed down by the host.

/// Bounds a container is measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    /// Creates constraints with exact width and height.
    pub fn tight(width: f32, height: f32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: height,
            max_height: height,
        }
    }

    /// Creates constraints with loose bounds (min = 0, max = given values).
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self {
            min_width: 0.0,
            max_width,
            min_height: 0.0,
            max_height,
        }
    }

    /// Returns true if a single finite size satisfies these constraints.
    pub fn is_tight(&self) -> bool {
        self.min_width == self.max_width
            && self.min_height == self.max_height
            && self.is_bounded()
    }

    pub fn is_bounded(&self) -> bool {
        self.max_width.is_finite() && self.max_height.is_finite()
    }

    pub fn constrain(&self, width: f32, height: f32) -> (f32, f32) {
        (
            width.clamp(self.min_width, self.max_width),
            height.clamp(self.min_height, self.max_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_finite_exact_bounds_are_tight() {
        assert!(Constraints::tight(100.0, 50.0).is_tight());
        assert!(!Constraints::loose(100.0, 50.0).is_tight());
        assert!(!Constraints::tight(f32::INFINITY, 50.0).is_tight());
        assert_eq!(Constraints::loose(100.0, 50.0).constrain(150.0, 20.0), (100.0, 20.0));
    }
}
