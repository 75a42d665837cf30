//! Per-pointer velocity tracking for fling detection.
//!
//! Each pointer gets one impulse-strategy tracker per axis. The impulse
//! strategy integrates the kinetic energy imparted between consecutive
//! samples, which is far less sensitive to a single noisy sample than a
//! least-squares fit over the same window.

use smallvec::SmallVec;

use crate::types::{PointerEvent, PointerEventKind, PointerId};

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window (ms) contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long (ms) between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default, Debug)]
struct Sample {
    time_ms: i64,
    value: f32,
}

/// Single-axis impulse velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, value: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, value });
    }

    /// Velocity in units per second; zero without at least two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest sample collecting (age, value)
        // pairs until the horizon or a stop gap is reached.
        let mut values = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut previous_time = newest.time_ms;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous_time = sample.time_ms;

            values[count] = sample.value;
            times[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&values[..count], &times[..count]) * 1000.0
    }

    /// Velocity in units per second, capped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `values`/`times` are ordered newest first; times are non-positive ages.
/// Returns units per millisecond.
fn impulse_velocity(values: &[f32], times: &[f32]) -> f32 {
    let oldest = values.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (values[i] - values[i - 1]) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = ½·m·v² with unit mass.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[derive(Clone, Debug)]
struct PointerTrack {
    id: PointerId,
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

/// Two-axis velocity tracker keyed by pointer id.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    tracks: SmallVec<[PointerTrack; 2]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every pointer of `event`. A `Down` starts a fresh history.
    pub fn add_movement(&mut self, event: &PointerEvent) {
        if event.kind == PointerEventKind::Down {
            self.clear();
        }
        for sample in &event.pointers {
            let track = match self.tracks.iter().position(|track| track.id == sample.id) {
                Some(index) => &mut self.tracks[index],
                None => {
                    self.tracks.push(PointerTrack {
                        id: sample.id,
                        x: VelocityTracker1D::new(),
                        y: VelocityTracker1D::new(),
                    });
                    let last = self.tracks.len() - 1;
                    &mut self.tracks[last]
                }
            };
            track.x.add_data_point(event.uptime_ms, sample.position.x);
            track.y.add_data_point(event.uptime_ms, sample.position.y);
        }
    }

    /// `(x, y)` velocity of `pointer` in px/s, each axis capped at
    /// `±max_velocity`. `None` when the pointer was never seen.
    pub fn velocity(&self, pointer: PointerId, max_velocity: f32) -> Option<(f32, f32)> {
        self.tracks
            .iter()
            .find(|track| track.id == pointer)
            .map(|track| {
                (
                    track.x.calculate_velocity_with_max(max_velocity),
                    track.y.calculate_velocity_with_max(max_velocity),
                )
            })
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
