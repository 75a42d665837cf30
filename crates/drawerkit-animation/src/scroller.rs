//! Frame-driven settle scroller.
//!
//! Holds one in-flight settle (start, delta, duration) and answers the
//! position for a given frame time. The start time is latched on the first
//! frame that observes the animation, so timing stays deterministic no matter
//! when between frames the settle was requested.

use crate::easing::ease_out_quintic;
use crate::easing::Lerp;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// A single settle animation along one abstract axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SettleScroller {
    start: f32,
    target: f32,
    current: f32,
    duration_ms: u64,
    /// Frame time when the animation started (latched on the first frame).
    start_frame_time_nanos: Option<u64>,
    finished: bool,
}

impl Default for SettleScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl SettleScroller {
    pub fn new() -> Self {
        Self {
            start: 0.0,
            target: 0.0,
            current: 0.0,
            duration_ms: 0,
            start_frame_time_nanos: None,
            finished: true,
        }
    }

    /// Starts settling from `start` by `delta` over `duration_ms`.
    pub fn start_scroll(&mut self, start: f32, delta: f32, duration_ms: u64) {
        log::trace!("settle start={start} delta={delta} duration={duration_ms}ms");
        self.start = start;
        self.target = start + delta;
        self.current = start;
        self.duration_ms = duration_ms;
        self.start_frame_time_nanos = None;
        self.finished = false;
    }

    /// Advances to `frame_time_nanos`.
    ///
    /// Returns `true` while the caller should apply [`current`](Self::current)
    /// and request another frame, including the frame that lands on the
    /// target. Returns `false` once the animation had already finished.
    pub fn compute_offset(&mut self, frame_time_nanos: u64) -> bool {
        if self.finished {
            return false;
        }

        let start_time = *self.start_frame_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_ms = frame_time_nanos.saturating_sub(start_time) / NANOS_PER_MILLI;

        if elapsed_ms >= self.duration_ms {
            self.current = self.target;
            self.finished = true;
        } else {
            let fraction = elapsed_ms as f32 / self.duration_ms as f32;
            self.current = self.start.lerp(&self.target, ease_out_quintic(fraction));
        }
        true
    }

    /// Stops the animation where it is.
    pub fn force_finished(&mut self) {
        self.finished = true;
    }

    /// Stops the animation and snaps the cursor to the target.
    ///
    /// Callers that apply positions themselves see no jump: the cursor only
    /// moves, nothing is applied until the next successful `compute_offset`.
    pub fn abort_animation(&mut self) {
        self.current = self.target;
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Clamps a position into `[0, max]`. A position past either bound
    /// stops the running settle there.
    pub fn clamp_or_abort(&mut self, position: f32, max: f32) -> f32 {
        if position < 0.0 {
            self.abort_animation();
            0.0
        } else if position > max {
            self.abort_animation();
            max
        } else {
            position
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: u64 = 16_666_667;

    #[test]
    fn new_scroller_is_finished() {
        let mut scroller = SettleScroller::new();
        assert!(scroller.is_finished());
        assert!(!scroller.compute_offset(0));
    }

    #[test]
    fn start_time_latches_on_first_frame() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(0.0, 300.0, 100);

        // First frame arrives late; it still counts as t = 0.
        assert!(scroller.compute_offset(5_000 * FRAME));
        assert_eq!(scroller.current(), 0.0);

        assert!(scroller.compute_offset(5_000 * FRAME + 50 * NANOS_PER_MILLI));
        let mid = scroller.current();
        assert!(mid > 150.0 && mid < 300.0, "got {mid}");
    }

    #[test]
    fn lands_exactly_on_target() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(200.0, -200.0, 341);

        let mut frame_time = 0;
        let mut frames = 0;
        while scroller.compute_offset(frame_time) {
            frame_time += FRAME;
            frames += 1;
            assert!(frames < 100, "settle never finished");
        }
        assert_eq!(scroller.current(), 0.0);
        assert!(scroller.is_finished());
    }

    #[test]
    fn zero_duration_completes_on_first_frame() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(10.0, 5.0, 0);
        assert!(scroller.compute_offset(42));
        assert_eq!(scroller.current(), 15.0);
        assert!(!scroller.compute_offset(43));
    }

    #[test]
    fn force_finished_keeps_position_but_abort_snaps_cursor() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(0.0, 100.0, 200);
        scroller.compute_offset(0);
        scroller.compute_offset(20 * NANOS_PER_MILLI);
        let partial = scroller.current();
        scroller.force_finished();
        assert_eq!(scroller.current(), partial);
        assert!(scroller.is_finished());

        scroller.start_scroll(0.0, 100.0, 200);
        scroller.abort_animation();
        assert_eq!(scroller.current(), 100.0);
        assert!(!scroller.compute_offset(FRAME));
    }

    #[test]
    fn clamping_past_a_bound_stops_the_settle() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(0.0, 300.0, 200);
        assert_eq!(scroller.clamp_or_abort(120.0, 300.0), 120.0);
        assert!(!scroller.is_finished());

        assert_eq!(scroller.clamp_or_abort(340.0, 300.0), 300.0);
        assert!(scroller.is_finished());

        scroller.start_scroll(300.0, -300.0, 200);
        assert_eq!(scroller.clamp_or_abort(-5.0, 300.0), 0.0);
        assert!(scroller.is_finished());
    }
}
