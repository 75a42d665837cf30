//! Shared gesture constants and the per-engine drag configuration.
//!
//! These values are in logical pixels. Edge margins are specified in
//! density-independent pixels and scaled by [`DragConfig::density`].

use drawerkit_graphics::Dp;

/// Touch slop in logical pixels.
///
/// A pointer must travel further than this from the last or the initial
/// position before a movement counts as a drag. The same value gates taps,
/// so a gesture can never be both a drag and a tap.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Fling velocities below this magnitude (px/s) count as no fling.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Width of the strip along each container edge in which a touch-down may
/// claim a drag for that edge's panel.
pub const EDGE_SIZE: Dp = Dp(20.0);

/// Tunables for one [`DragEngine`](crate::DragEngine).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    pub touch_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub edge_size: Dp,
    pub density: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            edge_size: EDGE_SIZE,
            density: 1.0,
        }
    }
}

impl DragConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    /// Scales the slop inversely with `sensitivity`; larger is more eager.
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        if sensitivity > 0.0 {
            self.touch_slop = (self.touch_slop * (1.0 / sensitivity)).floor();
        }
        self
    }

    /// Edge strip width in pixels.
    pub fn edge_size_px(&self) -> f32 {
        self.edge_size.round_to_px(self.density)
    }
}
