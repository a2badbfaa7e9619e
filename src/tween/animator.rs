//! Tween collections: sequences and keyed animators

use super::{Lerp, Tween, TweenEvent, TweenState};

/// Runs tweens back to back. Reports `Started` once when the first tween
/// begins and `Finished` once after the last one ends.
#[derive(Debug, Clone)]
pub struct Sequence<T: Lerp> {
    steps: Vec<Tween<T>>,
    current: usize,
    state: TweenState,
}

impl<T: Lerp> Sequence<T> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            current: 0,
            state: TweenState::Initialized,
        }
    }

    pub fn then(mut self, tween: Tween<T>) -> Self {
        self.steps.push(tween);
        self
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }

    /// Index of the tween currently playing
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn start(&mut self) -> Option<TweenEvent> {
        if self.state != TweenState::Initialized {
            return None;
        }
        match self.steps.first_mut() {
            Some(first) => {
                first.start();
                self.state = TweenState::Running;
                Some(TweenEvent::Started)
            }
            None => {
                self.state = TweenState::Finished;
                Some(TweenEvent::Finished)
            }
        }
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

    pub fn update(&mut self, dt: f32) -> Option<TweenEvent> {
        if self.state != TweenState::Running {
            return None;
        }
        let step = self.steps.get_mut(self.current)?;
        if step.update(dt) != Some(TweenEvent::Finished) {
            return None;
        }

        self.current += 1;
        match self.steps.get_mut(self.current) {
            Some(next) => {
                next.start();
                None
            }
            None => {
                self.current = self.steps.len() - 1;
                self.state = TweenState::Finished;
                Some(TweenEvent::Finished)
            }
        }
    }

    /// Value of the playing tween (last value once finished)
    pub fn value(&self) -> Option<T> {
        self.steps.get(self.current).map(|t| t.value())
    }
}

impl<T: Lerp> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tweens keyed by the property they drive.
///
/// Adding a tween under an existing key replaces it. Each `update` hands the
/// value of every running tween to the caller, so the animator never holds
/// references into the animated objects.
#[derive(Debug, Clone)]
pub struct Animator<K, T: Lerp> {
    tweens: Vec<(K, Tween<T>)>,
}

impl<K: PartialEq + Clone, T: Lerp> Animator<K, T> {
    pub fn new() -> Self {
        Self { tweens: Vec::new() }
    }

    /// Insert and start a tween for `key`
    pub fn add(&mut self, key: K, mut tween: Tween<T>) {
        tween.start();
        self.remove(&key);
        self.tweens.push((key, tween));
    }

    pub fn remove(&mut self, key: &K) -> Option<Tween<T>> {
        let idx = self.tweens.iter().position(|(k, _)| k == key)?;
        Some(self.tweens.remove(idx).1)
    }

    pub fn get(&self, key: &K) -> Option<&Tween<T>> {
        self.tweens.iter().find(|(k, _)| k == key).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Tween<T>> {
        self.tweens.iter_mut().find(|(k, _)| k == key).map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn pause_all(&mut self) {
        for (_, t) in &mut self.tweens {
            t.pause();
        }
    }

    pub fn resume_all(&mut self) {
        for (_, t) in &mut self.tweens {
            t.resume();
        }
    }

    /// Advance every tween and pass `(key, value)` for each one that is
    /// running or just finished. Finished tweens are dropped afterwards.
    /// Returns the keys that finished this update.
    pub fn update(&mut self, dt: f32, mut apply: impl FnMut(&K, T)) -> Vec<K> {
        let mut finished = Vec::new();
        for (key, tween) in &mut self.tweens {
            let event = tween.update(dt);
            if tween.is_running() || event == Some(TweenEvent::Finished) {
                apply(key, tween.value());
            }
            if event == Some(TweenEvent::Finished) {
                finished.push(key.clone());
            }
        }
        self.tweens.retain(|(_, t)| !t.is_finished());
        finished
    }
}

impl<K: PartialEq + Clone, T: Lerp> Default for Animator<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::Easing;

    #[test]
    fn test_sequence_runs_in_order() {
        let mut seq = Sequence::new()
            .then(Tween::new(0.0f32, 10.0, 1.0))
            .then(Tween::new(10.0f32, 0.0, 1.0));
        assert_eq!(seq.start(), Some(TweenEvent::Started));
        seq.update(0.5);
        assert!((seq.value().unwrap_or_default() - 5.0).abs() < 1e-4);
        seq.update(0.5);
        assert_eq!(seq.current_index(), 1);
        seq.update(0.5);
        assert!((seq.value().unwrap_or_default() - 5.0).abs() < 1e-4);
        assert_eq!(seq.update(0.5), Some(TweenEvent::Finished));
        assert!(seq.is_finished());
        assert_eq!(seq.value(), Some(0.0));
    }

    #[test]
    fn test_empty_sequence_finishes_on_start() {
        let mut seq: Sequence<f32> = Sequence::new();
        assert_eq!(seq.start(), Some(TweenEvent::Finished));
        assert_eq!(seq.update(1.0), None);
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Prop {
        X,
        Alpha,
    }

    #[test]
    fn test_animator_applies_and_drops_finished() {
        let mut anim = Animator::new();
        anim.add(Prop::X, Tween::new(0.0f32, 100.0, 1.0));
        anim.add(Prop::Alpha, Tween::new(0.0f32, 1.0, 2.0).easing(Easing::QuadOut));

        let mut x = 0.0;
        let mut alpha = 0.0;
        let done = anim.update(1.0, |k, v| match k {
            Prop::X => x = v,
            Prop::Alpha => alpha = v,
        });
        assert_eq!(done, vec![Prop::X]);
        assert_eq!(x, 100.0);
        assert!(alpha > 0.5);
        assert_eq!(anim.len(), 1);
        assert!(anim.get(&Prop::X).is_none());
    }

    #[test]
    fn test_animator_replaces_same_key() {
        let mut anim = Animator::new();
        anim.add(Prop::X, Tween::new(0.0f32, 1.0, 1.0));
        anim.add(Prop::X, Tween::new(5.0f32, 6.0, 1.0));
        assert_eq!(anim.len(), 1);
        assert_eq!(anim.get(&Prop::X).map(|t| *t.from_value()), Some(5.0));
    }

    #[test]
    fn test_paused_animator_holds_values() {
        let mut anim = Animator::new();
        anim.add(Prop::X, Tween::new(0.0f32, 1.0, 1.0));
        anim.pause_all();
        let mut calls = 0;
        anim.update(0.5, |_, _| calls += 1);
        assert_eq!(calls, 0);
        anim.resume_all();
        anim.update(0.5, |_, _| calls += 1);
        assert_eq!(calls, 1);
    }
}
