//! Radial reveal timing and per-region noise clocks.
//!
//! The animation has two phases. While `Revealing`, progress climbs from 0 to
//! 1 over the reveal duration and dots appear in a ring spreading out from
//! the grid center, each easing in over a band behind the ring's edge. The
//! first tick that reaches progress 1 switches to `Continuous` for good.
//! Noise time advances on every tick in both phases.
//!
//! All mutable state lives in [`AnimationClock`], a plain value threaded
//! through [`RevealScheduler::tick`], so a run can be replayed from synthetic
//! timestamps.

use crate::grid::Region;

/// Width of the easing band behind the reveal front, in normalized distance.
pub const DEFAULT_REVEAL_BAND: f64 = 0.4;

/// Animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Revealing,
    Continuous,
}

/// Mutable animation state, advanced once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    pub phase: Phase,
    pub reveal_elapsed_ms: f64,
    /// In [0, 1], non-decreasing, never reset.
    pub reveal_progress: f64,
    /// Accumulated noise time, indexed by [`Region::index`].
    pub noise_time: [f64; 2],
    last_timestamp_ms: Option<f64>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    /// A clock at the very start of the reveal.
    pub fn new() -> Self {
        Self {
            phase: Phase::Revealing,
            reveal_elapsed_ms: 0.0,
            reveal_progress: 0.0,
            noise_time: [0.0; 2],
            last_timestamp_ms: None,
        }
    }

    /// A clock frozen at `progress`, for still renders.
    ///
    /// Progress is clamped to [0, 1]; at 1 the clock is already `Continuous`.
    pub fn with_progress(progress: f64) -> Self {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        Self {
            phase: if progress >= 1.0 {
                Phase::Continuous
            } else {
                Phase::Revealing
            },
            reveal_progress: progress,
            ..Self::new()
        }
    }

    pub fn noise_time(&self, region: Region) -> f64 {
        self.noise_time[region.index()]
    }

    pub fn is_revealed(&self) -> bool {
        self.phase == Phase::Continuous
    }
}

/// Result of advancing the clock by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub clock: AnimationClock,
    /// True only on the tick where the reveal finished.
    pub reveal_completed: bool,
}

/// Fixed pacing for the reveal and the noise clocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealScheduler {
    duration_ms: f64,
    band: f64,
    noise_speed: [f64; 2],
}

impl RevealScheduler {
    /// `noise_speed` is the per-tick noise time increment for
    /// `[background, subject]`.
    pub fn new(duration_ms: f64, band: f64, noise_speed: [f64; 2]) -> Self {
        Self {
            duration_ms,
            band,
            noise_speed,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Advances `clock` to `timestamp_ms`.
    ///
    /// The frame delta is the time since the previous tick: zero on the first
    /// tick, and zero again if the timestamp goes backwards.
    pub fn tick(&self, clock: AnimationClock, timestamp_ms: f64) -> Tick {
        let mut next = clock;
        let delta = match clock.last_timestamp_ms {
            Some(last) if timestamp_ms > last => timestamp_ms - last,
            _ => 0.0,
        };
        if timestamp_ms.is_finite() {
            next.last_timestamp_ms = Some(
                clock
                    .last_timestamp_ms
                    .map_or(timestamp_ms, |last| last.max(timestamp_ms)),
            );
        }

        for (time, speed) in next.noise_time.iter_mut().zip(self.noise_speed) {
            *time += speed;
        }

        let mut reveal_completed = false;
        if next.phase == Phase::Revealing {
            next.reveal_elapsed_ms += delta;
            let progress = if self.duration_ms > 0.0 {
                (next.reveal_elapsed_ms / self.duration_ms).min(1.0)
            } else {
                1.0
            };
            next.reveal_progress = next.reveal_progress.max(progress);
            if next.reveal_progress >= 1.0 {
                next.reveal_progress = 1.0;
                next.phase = Phase::Continuous;
                reveal_completed = true;
            }
        }

        Tick {
            clock: next,
            reveal_completed,
        }
    }

    /// A cell at `distance` (normalized) is drawn iff it is inside the front.
    pub fn is_visible(progress: f64, distance: f64) -> bool {
        distance <= progress
    }

    /// Radius multiplier for a visible cell: ease-out cubic across the band
    /// behind the front while revealing, 1 once the reveal is complete.
    pub fn reveal_scale(&self, progress: f64, distance: f64) -> f64 {
        if progress >= 1.0 {
            return 1.0;
        }
        let band_progress = if self.band > 0.0 {
            ((progress - distance) / self.band).clamp(0.0, 1.0)
        } else {
            1.0
        };
        ease_out_cubic(band_progress)
    }
}

/// `1 - (1 - t)^3`, clamped to [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> RevealScheduler {
        RevealScheduler::new(1000.0, DEFAULT_REVEAL_BAND, [0.01, 0.002])
    }

    #[test]
    fn first_tick_has_zero_delta() {
        let tick = scheduler().tick(AnimationClock::new(), 5000.0);
        assert_eq!(tick.clock.reveal_elapsed_ms, 0.0);
        assert_eq!(tick.clock.reveal_progress, 0.0);
        assert!(!tick.reveal_completed);
    }

    #[test]
    fn progress_tracks_elapsed_over_duration() {
        let s = scheduler();
        let mut clock = s.tick(AnimationClock::new(), 100.0).clock;
        clock = s.tick(clock, 350.0).clock;
        assert!((clock.reveal_progress - 0.25).abs() < 1e-12);
        assert_eq!(clock.phase, Phase::Revealing);
    }

    #[test]
    fn progress_saturates_at_exactly_one() {
        let s = scheduler();
        let mut clock = s.tick(AnimationClock::new(), 0.0).clock;
        let tick = s.tick(clock, 5000.0);
        clock = tick.clock;
        assert_eq!(clock.reveal_progress, 1.0);
        assert_eq!(clock.phase, Phase::Continuous);
        assert!(tick.reveal_completed);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let s = scheduler();
        let mut clock = AnimationClock::new();
        let mut fired = 0;
        for frame in 0..200 {
            let tick = s.tick(clock, frame as f64 * 16.0);
            clock = tick.clock;
            if tick.reveal_completed {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(clock.is_revealed());
    }

    #[test]
    fn backwards_timestamps_do_not_rewind() {
        let s = scheduler();
        let mut clock = s.tick(AnimationClock::new(), 0.0).clock;
        clock = s.tick(clock, 400.0).clock;
        let before = clock.reveal_progress;
        clock = s.tick(clock, 100.0).clock;
        assert_eq!(clock.reveal_progress, before);
        // The next forward step is measured from the latest timestamp seen.
        clock = s.tick(clock, 500.0).clock;
        assert!((clock.reveal_progress - 0.5).abs() < 1e-12);
    }

    #[test]
    fn noise_time_advances_every_tick_in_both_phases() {
        let s = scheduler();
        let mut clock = AnimationClock::new();
        for frame in 0..100 {
            clock = s.tick(clock, frame as f64 * 100.0).clock;
        }
        assert!(clock.is_revealed());
        assert!((clock.noise_time(Region::Background) - 1.0).abs() < 1e-9);
        assert!((clock.noise_time(Region::Subject) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_reveals_on_first_tick() {
        let s = RevealScheduler::new(0.0, DEFAULT_REVEAL_BAND, [0.0, 0.0]);
        let tick = s.tick(AnimationClock::new(), 0.0);
        assert!(tick.reveal_completed);
        assert_eq!(tick.clock.reveal_progress, 1.0);
    }

    #[test]
    fn with_progress_clamps_and_sets_phase() {
        assert_eq!(AnimationClock::with_progress(2.0).reveal_progress, 1.0);
        assert!(AnimationClock::with_progress(1.0).is_revealed());
        assert!(!AnimationClock::with_progress(0.5).is_revealed());
        assert_eq!(AnimationClock::with_progress(f64::NAN).reveal_progress, 0.0);
    }

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn ease_out_cubic_is_monotonic() {
        let mut previous = ease_out_cubic(0.0);
        for i in 1..=1000 {
            let value = ease_out_cubic(i as f64 / 1000.0);
            assert!(value > previous, "not increasing at step {i}");
            previous = value;
        }
    }

    #[test]
    fn visibility_is_inclusive_at_the_front() {
        assert!(RevealScheduler::is_visible(0.5, 0.5));
        assert!(RevealScheduler::is_visible(0.0, 0.0));
        assert!(!RevealScheduler::is_visible(0.0, 0.01));
    }

    #[test]
    fn reveal_scale_eases_behind_the_front() {
        let s = scheduler();
        // On the front itself the dot has just appeared.
        assert_eq!(s.reveal_scale(0.5, 0.5), 0.0);
        // Half a band behind the front.
        assert!((s.reveal_scale(0.5, 0.3) - 0.875).abs() < 1e-12);
        // A full band behind the front.
        assert_eq!(s.reveal_scale(0.5, 0.1), 1.0);
        // Once revealed no easing applies, even on the outermost ring.
        assert_eq!(s.reveal_scale(1.0, 1.0), 1.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn progress_monotonic_and_single_transition(
                deltas in prop::collection::vec(0.0_f64..400.0, 1..80),
                duration in 1.0_f64..5000.0,
            ) {
                let s = RevealScheduler::new(duration, DEFAULT_REVEAL_BAND, [0.01, 0.01]);
                let mut clock = AnimationClock::new();
                let mut now = 0.0;
                let mut transitions = 0;
                let mut previous = 0.0;
                for delta in deltas {
                    now += delta;
                    let tick = s.tick(clock, now);
                    clock = tick.clock;
                    if tick.reveal_completed {
                        transitions += 1;
                    }
                    prop_assert!(clock.reveal_progress >= previous);
                    prop_assert!(clock.reveal_progress <= 1.0);
                    previous = clock.reveal_progress;
                }
                prop_assert!(transitions <= 1);
                prop_assert_eq!(transitions == 1, clock.reveal_progress == 1.0);
            }

            #[test]
            fn reveal_scale_in_unit_interval(
                progress in 0.0_f64..=1.0,
                distance in 0.0_f64..=1.0,
            ) {
                let scale = scheduler().reveal_scale(progress, distance);
                prop_assert!((0.0..=1.0).contains(&scale));
            }
        }
    }
}
