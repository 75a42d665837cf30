//! Settle duration model.
//!
//! Decides how long the remaining travel of a released panel should take so
//! that a slow release and a hard fling both feel continuous with the finger.

use std::f32::consts::PI;

/// Duration of a zero-velocity settle over zero distance, in milliseconds.
pub const BASE_SETTLE_DURATION_MS: u64 = 256;

/// Upper bound for any settle, in milliseconds.
pub const MAX_SETTLE_DURATION_MS: u64 = 600;

/// Clamps the magnitude of `value` into `[abs_min, abs_max]`, keeping its sign.
///
/// Magnitudes below `abs_min` collapse to zero rather than being raised to
/// the minimum, so a barely moving release counts as "no fling".
pub fn clamp_magnitude(value: f32, abs_min: f32, abs_max: f32) -> f32 {
    let abs_value = value.abs();
    if abs_value < abs_min {
        0.0
    } else if abs_value > abs_max {
        if value > 0.0 {
            abs_max
        } else {
            -abs_max
        }
    } else {
        value
    }
}

/// Pure settle-duration computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleModel {
    /// Release speeds below this are treated as zero (px/s).
    pub min_velocity: f32,
    /// Release speeds are capped at this magnitude (px/s).
    pub max_velocity: f32,
    /// Width of the container; half of it is the baseline travel distance.
    pub container_width: f32,
}

impl SettleModel {
    pub fn new(min_velocity: f32, max_velocity: f32, container_width: f32) -> Self {
        Self {
            min_velocity,
            max_velocity,
            container_width,
        }
    }

    /// Computes the settle duration in milliseconds for a travel of
    /// `(dx, dy)` released at `(xvel, yvel)`.
    ///
    /// `h_range`/`v_range` are the total motion ranges per axis and only
    /// matter for zero-velocity releases. The result depends on magnitudes
    /// only, never on direction.
    pub fn compute_settle_duration(
        &self,
        h_range: f32,
        v_range: f32,
        dx: f32,
        dy: f32,
        xvel: f32,
        yvel: f32,
    ) -> u64 {
        let xvel = clamp_magnitude(xvel, self.min_velocity, self.max_velocity);
        let yvel = clamp_magnitude(yvel, self.min_velocity, self.max_velocity);
        let abs_dx = dx.abs();
        let abs_dy = dy.abs();
        let abs_xvel = xvel.abs();
        let abs_yvel = yvel.abs();
        let added_vel = abs_xvel + abs_yvel;
        let added_distance = abs_dx + abs_dy;

        if added_distance == 0.0 {
            return 0;
        }

        let x_weight = if xvel != 0.0 {
            abs_xvel / added_vel
        } else {
            abs_dx / added_distance
        };
        let y_weight = if yvel != 0.0 {
            abs_yvel / added_vel
        } else {
            abs_dy / added_distance
        };

        let x_duration = self.compute_axis_duration(dx, xvel, h_range) as f32;
        let y_duration = self.compute_axis_duration(dy, yvel, v_range) as f32;

        ((x_duration * x_weight + y_duration * y_weight) as u64).min(MAX_SETTLE_DURATION_MS)
    }

    fn compute_axis_duration(&self, delta: f32, velocity: f32, motion_range: f32) -> u64 {
        if delta == 0.0 {
            return 0;
        }

        let width = self.container_width.max(0.0);
        let half_width = width / 2.0;
        let distance_ratio = if width > 0.0 {
            (delta.abs() / width).min(1.0)
        } else {
            1.0
        };
        let distance = half_width + half_width * distance_influence_for_snap_duration(distance_ratio);

        let velocity = velocity.abs();
        let duration = if velocity > 0.0 {
            4.0 * (1000.0 * (distance / velocity).abs()).round()
        } else {
            let range = if motion_range != 0.0 {
                delta.abs() / motion_range.abs()
            } else {
                0.0
            };
            (range + 1.0) * BASE_SETTLE_DURATION_MS as f32
        };

        (duration as u64).min(MAX_SETTLE_DURATION_MS)
    }
}

/// Sinusoidal shaping of the distance ratio, centred on half the container.
fn distance_influence_for_snap_duration(ratio: f32) -> f32 {
    let centered = ratio - 0.5;
    (centered * 0.3 * PI / 2.0).sin()
}
