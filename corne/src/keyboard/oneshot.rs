use embassy_time::Instant;

use crate::action::Action;
use crate::event::KeyEvent;
use crate::keyboard::Keyboard;
use crate::report::HidReporter;

/// State machine for one shot keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OneShotState<T> {
    /// First one shot key press
    Initial(T),
    /// One shot key was released before any other key, normal one shot behavior
    Single(T),
    /// Another key was pressed before one shot key was released, treat as a normal layer
    Held(T),
    /// One shot inactive
    #[default]
    None,
}

impl<T> OneShotState<T> {
    /// Get the current one shot value if any
    pub fn value(&self) -> Option<&T> {
        match self {
            OneShotState::Initial(v) | OneShotState::Single(v) | OneShotState::Held(v) => Some(v),
            OneShotState::None => None,
        }
    }
}

impl<'a, R: HidReporter, const ROW: usize, const COL: usize, const NUM_LAYER: usize> Keyboard<'a, R, ROW, COL, NUM_LAYER> {
    pub(crate) fn process_key_action_oneshot(&mut self, oneshot_action: Action, key_event: KeyEvent) {
        match oneshot_action {
            Action::LayerOn(layer_num) => self.process_action_osl(layer_num, key_event),
            _ => self.process_action(oneshot_action, key_event),
        }
    }

    fn process_action_osl(&mut self, layer_num: u8, key_event: KeyEvent) {
        // Update one shot state
        if key_event.pressed {
            // Deactivate old layer if any
            if let Some(&l) = self.osl_state.value() {
                self.layers.deactivate(l);
            }

            // Update layer of one shot
            self.osl_state = match self.osl_state {
                OneShotState::None | OneShotState::Initial(_) => OneShotState::Initial(layer_num),
                OneShotState::Single(_) => OneShotState::Single(layer_num),
                OneShotState::Held(_) => OneShotState::Held(layer_num),
            };
            self.osl_deadline = None;
            self.osl_key = None;

            // Activate new layer
            self.layers.activate(layer_num);
        } else {
            match self.osl_state {
                OneShotState::Initial(l) | OneShotState::Single(l) => {
                    // Wait for the next key, or the timeout
                    self.osl_state = OneShotState::Single(l);
                    self.osl_deadline = Some(key_event.time + self.behavior.one_shot.timeout);
                }
                OneShotState::Held(l) => {
                    self.osl_state = OneShotState::None;
                    self.layers.deactivate(l);
                }
                OneShotState::None => (),
            }
        }
    }

    /// Called after every action, the one shot layer applies to exactly one key.
    ///
    /// Only presses count: releasing a key which was held before the one shot key
    /// neither turns it into a held layer nor consumes it.
    pub(crate) fn update_osl(&mut self, key_event: KeyEvent) {
        let pos = (key_event.row, key_event.col);
        match self.osl_state {
            OneShotState::Initial(l) if key_event.pressed => self.osl_state = OneShotState::Held(l),
            OneShotState::Single(layer_num) => {
                if key_event.pressed {
                    // The next key came in time
                    if self.osl_key.is_none() {
                        self.osl_key = Some(pos);
                    }
                    self.osl_deadline = None;
                } else if self.osl_key == Some(pos) {
                    self.layers.deactivate(layer_num);
                    self.osl_state = OneShotState::None;
                    self.osl_key = None;
                }
            }
            _ => (),
        }
    }

    pub(crate) fn expire_one_shot(&mut self, now: Instant) {
        let Some(deadline) = self.osl_deadline else {
            return;
        };
        if now >= deadline {
            if let OneShotState::Single(layer_num) = self.osl_state {
                debug!("One shot layer {} timed out", layer_num);
                self.layers.deactivate(layer_num);
                self.osl_state = OneShotState::None;
                self.osl_key = None;
            }
            self.osl_deadline = None;
        }
    }
}
