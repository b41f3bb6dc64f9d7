use embassy_time::{Duration, Instant};
use heapless::Deque;

use crate::action::{Action, KeyAction};
use crate::event::KeyEvent;
use crate::keyboard::Keyboard;
use crate::report::HidReporter;

/// A tap-hold key which is pressed and not yet decided
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct PendingTapHold {
    row: u8,
    col: u8,
    tap: Action,
    hold: Action,
    pressed_at: Instant,
    tapping_term: Duration,
}

impl PendingTapHold {
    pub(crate) fn deadline(&self) -> Instant {
        self.pressed_at + self.tapping_term
    }

    pub(crate) fn is_at(&self, event: KeyEvent) -> bool {
        self.row == event.row && self.col == event.col
    }

    fn event(&self, pressed: bool, time: Instant) -> KeyEvent {
        KeyEvent::new(self.row, self.col, pressed, time)
    }
}

impl<'a, R: HidReporter, const ROW: usize, const COL: usize, const NUM_LAYER: usize> Keyboard<'a, R, ROW, COL, NUM_LAYER> {
    pub(crate) fn process_key_action_tap_hold(
        &mut self,
        key_action: KeyAction,
        tap_action: Action,
        hold_action: Action,
        key_event: KeyEvent,
    ) {
        if key_event.pressed {
            let tapping_term = self.behavior.tap_hold.tapping_term(&key_action);
            debug!("Tap-hold key ({}, {}) pressed, term {}ms", key_event.row, key_event.col, tapping_term.as_millis());
            self.pending_tap_hold = Some(PendingTapHold {
                row: key_event.row,
                col: key_event.col,
                tap: tap_action,
                hold: hold_action,
                pressed_at: key_event.time,
                tapping_term,
            });
        } else {
            // A release which reaches here was decided as hold
            self.process_action(hold_action, key_event);
        }
    }

    /// The pending key was released within its tapping term
    pub(crate) fn resolve_tap(&mut self, release: KeyEvent) {
        let Some(pending) = self.pending_tap_hold.take() else {
            return;
        };
        debug!("Tap-hold key ({}, {}) tapped", pending.row, pending.col);
        // Drop the layer the press was cached on
        self.keymap.get_action_with_layer_cache(&self.layers, release);
        self.process_action(pending.tap, pending.event(true, pending.pressed_at));
        self.process_action(pending.tap, release);
        self.replay_held_buffer();
    }

    /// Decide the pending key as hold when its tapping term has elapsed at `now`
    pub(crate) fn expire_tap_hold(&mut self, now: Instant) {
        let Some(pending) = self.pending_tap_hold else {
            return;
        };
        let deadline = pending.deadline();
        if now < deadline {
            return;
        }
        debug!("Tap-hold key ({}, {}) held", pending.row, pending.col);
        self.pending_tap_hold = None;
        self.process_action(pending.hold, pending.event(true, deadline));
        self.replay_held_buffer();
    }

    /// Events buffered during the decision continue down the pipeline in order
    fn replay_held_buffer(&mut self) {
        let mut buffered = core::mem::replace(&mut self.held_buffer, Deque::new());
        while let Some(input) = buffered.pop_front() {
            self.dispatch(input);
        }
    }
}
