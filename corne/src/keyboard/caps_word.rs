use embassy_time::{Duration, Instant};

use crate::keyboard::Keyboard;
use crate::keycode::KeyCode;
use crate::modifier::HidModifiers;
use crate::report::HidReporter;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CapsWordState {
    active: bool,
    /// The pressed key is sent with shift
    shift: bool,
    last_activity: Option<Instant>,
}

impl CapsWordState {
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn is_shifting(&self) -> bool {
        self.active && self.shift
    }

    pub(crate) fn clear_shift(&mut self) {
        self.shift = false;
    }

    pub(crate) fn deadline(&self, idle_timeout: Duration) -> Option<Instant> {
        if !self.active {
            return None;
        }
        self.last_activity.map(|t| t + idle_timeout)
    }

    fn activate(&mut self, now: Instant) {
        self.active = true;
        self.shift = false;
        self.last_activity = Some(now);
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.shift = false;
        self.last_activity = None;
    }
}

impl<'a, R: HidReporter, const ROW: usize, const COL: usize, const NUM_LAYER: usize> Keyboard<'a, R, ROW, COL, NUM_LAYER> {
    pub(crate) fn toggle_caps_word(&mut self, now: Instant) {
        if self.caps_word.is_active() {
            debug!("Caps word off");
            self.caps_word.deactivate();
        } else {
            debug!("Caps word on");
            self.caps_word.activate(now);
        }
    }

    /// Check a pressed key against caps word: shift it, let it continue the word, or end the word.
    pub(crate) fn update_caps_word(&mut self, key: KeyCode, now: Instant) {
        if !self.caps_word.is_active() || key.is_modifier() {
            return;
        }
        // Shortcuts end the word, only shift may be held
        let shift = HidModifiers::new().with_left_shift(true).with_right_shift(true);
        if !((self.held_modifiers | self.with_modifiers) & !shift).is_empty() {
            debug!("Caps word ended by {:?} with a modifier", key);
            self.caps_word.deactivate();
            return;
        }
        if key.is_caps_word_continue_key() {
            self.caps_word.shift = key.is_caps_word_shifted_key();
            self.caps_word.last_activity = Some(now);
        } else {
            debug!("Caps word ended by {:?}", key);
            self.caps_word.deactivate();
        }
    }

    pub(crate) fn expire_caps_word(&mut self, now: Instant) {
        if let Some(deadline) = self.caps_word.deadline(self.behavior.caps_word.idle_timeout) {
            if now >= deadline {
                debug!("Caps word idle timeout");
                self.caps_word.deactivate();
            }
        }
    }
}
