//! Game actions bound to physical inputs
//!
//! An action counts presses between reads, so a tap that starts and ends
//! inside one frame is never lost. Reading the amount consumes it.

/// How an action reports a key that stays held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionBehavior {
    /// Reports pressed for as long as the input is held
    #[default]
    Normal,
    /// Reports one press, then nothing until released and pressed again
    InitialPressOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Released,
    Pressed,
    /// Initial press was consumed; waiting for release
    WaitingForRelease,
}

#[derive(Debug, Clone)]
pub struct InputAction {
    name: String,
    behavior: ActionBehavior,
    state: ActionState,
    amount: u32,
}

impl InputAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_behavior(name, ActionBehavior::Normal)
    }

    pub fn with_behavior(name: impl Into<String>, behavior: ActionBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            state: ActionState::Released,
            amount: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn behavior(&self) -> ActionBehavior {
        self.behavior
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Forget any pending presses
    pub fn reset(&mut self) {
        self.state = ActionState::Released;
        self.amount = 0;
    }

    /// Press and release within the same frame
    pub fn tap(&mut self) {
        self.press();
        self.release();
    }

    pub fn press(&mut self) {
        self.press_amount(1);
    }

    /// Press with a weight (e.g. mouse wheel notches)
    pub fn press_amount(&mut self, amount: u32) {
        if self.state != ActionState::WaitingForRelease {
            self.amount = self.amount.saturating_add(amount);
            self.state = ActionState::Pressed;
        }
    }

    pub fn release(&mut self) {
        self.state = ActionState::Released;
    }

    /// Non-consuming check
    pub fn is_pressed(&self) -> bool {
        self.amount > 0 || self.state == ActionState::Pressed
    }

    /// Presses since the last read. A held Normal action reports at least 1
    /// every read; an InitialPressOnly action reports once per hold.
    pub fn amount(&mut self) -> u32 {
        let count = self.amount;
        match self.state {
            ActionState::Released => self.amount = 0,
            ActionState::Pressed => match self.behavior {
                ActionBehavior::InitialPressOnly => {
                    self.state = ActionState::WaitingForRelease;
                    self.amount = 0;
                }
                ActionBehavior::Normal => self.amount = 1,
            },
            ActionState::WaitingForRelease => self.amount = 0,
        }
        count
    }

    /// Consume and report whether the action fired
    pub fn fired(&mut self) -> bool {
        self.amount() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_action_repeats_while_held() {
        let mut a = InputAction::new("jump");
        a.press();
        assert_eq!(a.amount(), 1);
        assert_eq!(a.amount(), 1);
        a.release();
        assert_eq!(a.amount(), 1);
        assert_eq!(a.amount(), 0);
        assert!(!a.is_pressed());
    }

    #[test]
    fn test_initial_press_only_fires_once_per_hold() {
        let mut a = InputAction::with_behavior("fire", ActionBehavior::InitialPressOnly);
        a.press();
        assert!(a.fired());
        // still held: OS key repeat must not re-fire
        a.press();
        assert!(!a.fired());
        a.release();
        a.press();
        assert!(a.fired());
    }

    #[test]
    fn test_tap_is_not_lost() {
        let mut a = InputAction::new("menu");
        a.tap();
        a.tap();
        assert_eq!(a.amount(), 2);
        assert_eq!(a.amount(), 0);
    }

    #[test]
    fn test_reset_clears_pending() {
        let mut a = InputAction::new("zoom");
        a.press_amount(3);
        a.reset();
        assert_eq!(a.amount(), 0);
        assert_eq!(a.state(), ActionState::Released);
    }
}
