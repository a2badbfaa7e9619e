//! Constant-speed movement toward a target point

use macroquad::prelude::Vec2;
use super::{TweenEvent, TweenState};

/// Moves a point in a straight line at a fixed speed until it reaches the
/// target coordinate. Unlike `Tween` there is no duration: finishing is
/// decided by distance, and the last step lands exactly on the target.
#[derive(Debug, Clone)]
pub struct MoveTo {
    position: Vec2,
    target: Vec2,
    /// Units per second
    speed: f32,
    state: TweenState,
    auto_start: bool,
}

impl MoveTo {
    pub fn new(from: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            position: from,
            target,
            speed: speed.max(0.0),
            state: TweenState::Initialized,
            auto_start: false,
        }
    }

    pub fn auto_start(mut self) -> Self {
        self.auto_start = true;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Remaining straight-line distance
    pub fn remaining(&self) -> f32 {
        (self.target - self.position).length()
    }

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

    /// Restart from the current position toward a new target
    pub fn reset_toward(&mut self, target: Vec2) {
        self.target = target;
        self.state = TweenState::Initialized;
    }

    pub fn update(&mut self, dt: f32) -> Option<TweenEvent> {
        if self.state == TweenState::Initialized && self.auto_start {
            self.state = TweenState::Running;
            return Some(TweenEvent::Started);
        }
        if self.state != TweenState::Running {
            return None;
        }

        let delta = self.target - self.position;
        let distance = delta.length();
        let step = self.speed * dt.max(0.0);

        if step >= distance {
            self.position = self.target;
            self.state = TweenState::Finished;
            return Some(TweenEvent::Finished);
        }

        self.position += delta / distance * step;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    #[test]
    fn test_reaches_target_without_overshoot() {
        let mut m = MoveTo::new(vec2(0.0, 0.0), vec2(10.0, 0.0), 4.0);
        m.start();
        assert_eq!(m.update(1.0), None);
        assert_eq!(m.position(), vec2(4.0, 0.0));
        assert_eq!(m.update(1.0), None);
        assert_eq!(m.update(1.0), Some(TweenEvent::Finished));
        assert_eq!(m.position(), vec2(10.0, 0.0));
        assert_eq!(m.update(1.0), None);
    }

    #[test]
    fn test_zero_distance_finishes_immediately() {
        let mut m = MoveTo::new(vec2(3.0, 3.0), vec2(3.0, 3.0), 1.0).auto_start();
        assert_eq!(m.update(0.1), Some(TweenEvent::Started));
        assert_eq!(m.update(0.1), Some(TweenEvent::Finished));
    }

    #[test]
    fn test_diagonal_speed_is_per_unit_length() {
        let mut m = MoveTo::new(vec2(0.0, 0.0), vec2(30.0, 40.0), 5.0);
        m.start();
        m.update(1.0);
        assert!((m.position() - vec2(3.0, 4.0)).length() < 1e-4);
        assert!((m.remaining() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_toward_new_target() {
        let mut m = MoveTo::new(vec2(0.0, 0.0), vec2(1.0, 0.0), 10.0);
        m.start();
        m.update(1.0);
        assert!(m.is_finished());
        m.reset_toward(vec2(1.0, 5.0));
        assert!(m.start());
        m.update(0.2);
        assert_eq!(m.position(), vec2(1.0, 2.0));
    }
}
