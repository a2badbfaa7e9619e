//! Tween state machine
//!
//! A tween moves a percentage accumulator from 0 to 1 and maps it through an
//! easing curve onto a `from -> to` blend.
//!
//! States:
//! ```text
//! Initialized --start--> Running --(percent reaches 1)--> Finished
//!                         |   ^
//!                   pause |   | resume
//!                         v   |
//!                         Paused
//! ```
//! Each run enters Running once and Finished once. `reset` is the only way
//! back to Initialized.

use super::{Easing, Lerp};

/// Progress this close to the end of a repetition completes it, so summed
/// steps such as 60 x (1/60) land on the final update
const COMPLETE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    Initialized,
    Running,
    Paused,
    Finished,
}

/// Transition reported by `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEvent {
    Started,
    /// A repetition completed and the next one began
    Looped,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Never,
    /// Run this many extra times after the first pass
    Times(u32),
    Forever,
}

/// How fast the percentage accumulator advances
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pace {
    /// Whole run takes this many seconds
    Duration(f32),
    /// Fixed percentage added on every update, independent of dt
    PerUpdate(f32),
}

#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    pace: Pace,
    easing: Easing,
    delay: f32,
    delay_left: f32,
    repeat: Repeat,
    yoyo: bool,
    auto_start: bool,
    state: TweenState,
    /// Accumulated progress of the current repetition
    progress: f64,
    percent: f32,
    loops_done: u32,
    reversed: bool,
}

impl<T: Lerp> Tween<T> {
    /// Tween lasting `duration` seconds
    pub fn new(from: T, to: T, duration: f32) -> Self {
        Self::with_pace(from, to, Pace::Duration(duration))
    }

    /// Tween advancing a fixed step per update; finishes after `updates` updates
    pub fn over_updates(from: T, to: T, updates: u32) -> Self {
        Self::with_pace(from, to, Pace::PerUpdate(1.0 / updates.max(1) as f32))
    }

    pub fn with_pace(from: T, to: T, pace: Pace) -> Self {
        Self {
            from,
            to,
            pace,
            easing: Easing::Linear,
            delay: 0.0,
            delay_left: 0.0,
            repeat: Repeat::Never,
            yoyo: false,
            auto_start: false,
            state: TweenState::Initialized,
            progress: 0.0,
            percent: 0.0,
            loops_done: 0,
            reversed: false,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Seconds to wait after starting before the accumulator moves
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self.delay_left = self.delay;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Alternate direction on every repetition
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Start on the first `update` instead of waiting for `start`
    pub fn auto_start(mut self) -> Self {
        self.auto_start = true;
        self
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }

    /// Raw linear progress of the current repetition, 0..1
    pub fn percentage(&self) -> f32 {
        self.percent
    }

    /// Progress after the easing curve
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.percent)
    }

    /// Repetitions completed so far
    pub fn loops_done(&self) -> u32 {
        self.loops_done
    }

    pub fn current_easing(&self) -> Easing {
        self.easing
    }

    pub fn from_value(&self) -> &T {
        &self.from
    }

    pub fn to_value(&self) -> &T {
        &self.to
    }

    /// Change the destination; progress is kept
    pub fn retarget(&mut self, to: T) {
        self.to = to;
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        let t = self.eased();
        if self.reversed {
            self.to.lerp(&self.from, t)
        } else {
            self.from.lerp(&self.to, t)
        }
    }

    /// Initialized -> Running. Returns false in any other state.
    pub fn start(&mut self) -> bool {
        if self.state != TweenState::Initialized {
            return false;
        }
        self.state = TweenState::Running;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != TweenState::Running {
            return false;
        }
        self.state = TweenState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != TweenState::Paused {
            return false;
        }
        self.state = TweenState::Running;
        true
    }

    /// Jump to the end of a started run
    pub fn stop(&mut self) -> bool {
        match self.state {
            TweenState::Running | TweenState::Paused => {
                self.progress = 1.0;
                self.percent = 1.0;
                self.state = TweenState::Finished;
                true
            }
            TweenState::Initialized | TweenState::Finished => false,
        }
    }

    /// Back to Initialized for another run
    pub fn reset(&mut self) {
        self.state = TweenState::Initialized;
        self.progress = 0.0;
        self.percent = 0.0;
        self.loops_done = 0;
        self.reversed = false;
        self.delay_left = self.delay;
    }

    /// Advance by `dt` seconds. Only a running tween moves.
    ///
    /// An update long enough to cover several repetitions counts every one
    /// of them (and flips a yoyo each time) but reports a single `Looped`.
    pub fn update(&mut self, dt: f32) -> Option<TweenEvent> {
        if self.state == TweenState::Initialized && self.auto_start {
            self.state = TweenState::Running;
            return Some(TweenEvent::Started);
        }
        if self.state != TweenState::Running {
            return None;
        }

        let mut dt = dt.max(0.0);
        if self.delay_left > 0.0 {
            self.delay_left -= dt;
            if self.delay_left > 0.0 {
                return None;
            }
            dt = -self.delay_left;
            self.delay_left = 0.0;
        }

        let step = match self.pace {
            Pace::Duration(d) if d <= 0.0 => 1.0,
            Pace::Duration(d) => dt / d,
            Pace::PerUpdate(p) => p,
        };
        self.progress += step as f64;
        if !self.progress.is_finite() {
            self.progress = 1.0;
        }

        let mut looped = false;
        while self.progress >= 1.0 - COMPLETE_EPSILON {
            if !self.has_repetition_left() {
                self.progress = 1.0;
                self.percent = 1.0;
                self.state = TweenState::Finished;
                return Some(TweenEvent::Finished);
            }
            self.loops_done += 1;
            self.progress = (self.progress - 1.0).max(0.0);
            if self.yoyo {
                self.reversed = !self.reversed;
            }
            looped = true;
        }

        self.percent = self.progress as f32;
        looped.then_some(TweenEvent::Looped)
    }

    fn has_repetition_left(&self) -> bool {
        match self.repeat {
            Repeat::Never => false,
            Repeat::Times(n) => self.loops_done < n,
            Repeat::Forever => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive a tween to completion, recording every transition
    fn run_to_end(tween: &mut Tween<f32>, dt: f32) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            if let Some(e) = tween.update(dt) {
                events.push(e);
            }
            if tween.is_finished() {
                break;
            }
        }
        events
    }

    #[test]
    fn test_initialized_tween_does_not_move() {
        let mut t = Tween::new(0.0f32, 10.0, 1.0);
        assert_eq!(t.update(0.5), None);
        assert_eq!(t.state(), TweenState::Initialized);
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn test_each_transition_happens_once() {
        let mut t = Tween::new(0.0f32, 10.0, 1.0).auto_start();
        let events = run_to_end(&mut t, 0.1);
        assert_eq!(events.first(), Some(&TweenEvent::Started));
        assert_eq!(events.iter().filter(|e| **e == TweenEvent::Started).count(), 1);
        assert_eq!(events.iter().filter(|e| **e == TweenEvent::Finished).count(), 1);
        assert_eq!(events.last(), Some(&TweenEvent::Finished));
        assert!((t.value() - 10.0).abs() < 1e-5);

        // Finished is terminal: further updates and start() do nothing
        assert_eq!(t.update(1.0), None);
        assert!(!t.start());
        assert!(t.is_finished());
    }

    #[test]
    fn test_start_only_from_initialized() {
        let mut t = Tween::new(0.0f32, 1.0, 1.0);
        assert!(t.start());
        assert!(!t.start());
        t.update(0.25);
        assert!((t.percentage() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_pause_freezes_progress() {
        let mut t = Tween::new(0.0f32, 100.0, 2.0);
        t.start();
        t.update(0.5);
        assert!(t.pause());
        let frozen = t.value();
        t.update(1.0);
        assert_eq!(t.value(), frozen);
        assert_eq!(t.state(), TweenState::Paused);
        assert!(t.resume());
        t.update(0.5);
        assert!((t.value() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_stop_requires_started_run() {
        let mut t = Tween::new(0.0f32, 1.0, 1.0);
        assert!(!t.stop());
        assert_eq!(t.state(), TweenState::Initialized);
        t.start();
        assert!(t.stop());
        assert_eq!(t.value(), 1.0);
        assert!(t.is_finished());
    }

    #[test]
    fn test_per_update_pace_ignores_dt() {
        let mut t = Tween::over_updates(0.0f32, 1.0, 4);
        t.start();
        assert_eq!(t.update(100.0), None);
        assert_eq!(t.update(0.0), None);
        assert_eq!(t.update(0.0), None);
        assert_eq!(t.update(0.0), Some(TweenEvent::Finished));
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut t = Tween::new(0.0f32, 10.0, 1.0).delay(0.5);
        t.start();
        t.update(0.3);
        assert_eq!(t.percentage(), 0.0);
        // 0.2 of the next 0.4 is spent waiting
        t.update(0.4);
        assert!((t.percentage() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_repeat_with_yoyo_finishes_once() {
        let mut t = Tween::new(0.0f32, 10.0, 1.0).repeat(Repeat::Times(2)).yoyo(true);
        t.start();
        let events = run_to_end(&mut t, 0.25);
        let loops = events.iter().filter(|e| **e == TweenEvent::Looped).count();
        assert_eq!(loops, 2);
        assert_eq!(events.iter().filter(|e| **e == TweenEvent::Finished).count(), 1);
        // Three passes: forward, back, forward
        assert!((t.value() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_reset_allows_another_run() {
        let mut t = Tween::new(0.0f32, 1.0, 0.1);
        t.start();
        run_to_end(&mut t, 0.05);
        t.reset();
        assert_eq!(t.state(), TweenState::Initialized);
        assert_eq!(t.value(), 0.0);
        assert!(t.start());
    }

    #[test]
    fn test_over_updates_finishes_on_last_update() {
        for n in [3, 12, 19, 23, 27, 28, 41, 97, 240] {
            let mut t = Tween::over_updates(0.0f32, 1.0, n);
            t.start();
            let mut count = 0;
            while !t.is_finished() && count < 10_000 {
                t.update(0.0);
                count += 1;
            }
            assert_eq!(count, n, "over_updates({n})");
        }
    }

    #[test]
    fn test_one_second_at_sixty_hz_takes_sixty_updates() {
        let mut t = Tween::new(0.0f32, 1.0, 1.0);
        t.start();
        let mut count = 0;
        while !t.is_finished() && count < 1_000 {
            t.update(1.0 / 60.0);
            count += 1;
        }
        assert_eq!(count, 60);
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn test_long_update_counts_every_repetition() {
        let mut t = Tween::new(0.0f32, 10.0, 1.0).repeat(Repeat::Times(3)).yoyo(true);
        t.start();
        assert_eq!(t.update(2.5), Some(TweenEvent::Looped));
        assert_eq!(t.loops_done(), 2);
        // flipped twice, so forward again at the halfway point
        assert!((t.value() - 5.0).abs() < 1e-4);

        assert_eq!(t.update(1.0), Some(TweenEvent::Looped));
        assert_eq!(t.loops_done(), 3);
        assert_eq!(t.update(0.5), Some(TweenEvent::Finished));
        // fourth pass runs backwards
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn test_update_past_last_repetition_finishes() {
        let mut t = Tween::new(0.0f32, 10.0, 1.0).repeat(Repeat::Times(1));
        t.start();
        assert_eq!(t.update(5.0), Some(TweenEvent::Finished));
        assert_eq!(t.loops_done(), 1);
        assert_eq!(t.value(), 10.0);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_update() {
        let mut t = Tween::new(3.0f32, 4.0, 0.0);
        t.start();
        assert_eq!(t.update(0.0), Some(TweenEvent::Finished));
        assert_eq!(t.value(), 4.0);
    }
}
