mod caps_word;
mod mouse;
mod oneshot;
mod tap_hold;

use embassy_time::Instant;
use heapless::Deque;
use usbd_hid::descriptor::MediaKeyboardReport;

use self::caps_word::CapsWordState;
use self::mouse::MouseState;
pub use self::oneshot::OneShotState;
use self::tap_hold::PendingTapHold;
use crate::action::{Action, KeyAction};
use crate::combo::{ComboMatcher, ComboOutput, ComboOutputs};
use crate::compose::{ComposeAction, ComposeError, MacroOperation};
use crate::config::BehaviorConfig;
use crate::event::KeyEvent;
use crate::keycode::KeyCode;
use crate::keymap::KeyMap;
use crate::layer_state::ActiveLayerSet;
use crate::modifier::{HidModifiers, ModifierCombination};
use crate::report::{HidReporter, KeyboardReport, Report};

// Max number of events held back while a tap-hold key is undecided
pub(crate) const HELD_BUFFER_SIZE: usize = 16;

/// The keymap engine.
///
/// Key events go through the combo matcher, then the tap-hold gate, then the keymap
/// resolves them to actions. Reports are handed to the reporter synchronously.
pub struct Keyboard<'a, R: HidReporter, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    keymap: KeyMap<'a, ROW, COL, NUM_LAYER>,

    /// Compose actions, `Action::Compose(i)` runs the i-th one
    compose_actions: &'a [ComposeAction],

    /// Options for configurable action behavior
    behavior: BehaviorConfig,

    /// Where the reports go
    reporter: R,

    /// Active layers
    layers: ActiveLayerSet,

    combos: ComboMatcher,

    /// The tap-hold key waiting for its tap or hold decision
    pending_tap_hold: Option<PendingTapHold>,

    /// Events which arrived while a tap-hold key was undecided, replayed after the decision
    held_buffer: Deque<ComboOutput, HELD_BUFFER_SIZE>,

    /// One shot layer state
    osl_state: OneShotState<u8>,

    /// When the one shot layer gives up waiting for a key
    osl_deadline: Option<Instant>,

    /// Position of the key which consumes the one shot layer
    osl_key: Option<(u8, u8)>,

    caps_word: CapsWordState,

    /// Registered modifiers, from modifier keys and hold actions
    held_modifiers: HidModifiers,

    /// Modifiers of `Action::KeyWithModifier` keys which are pressed
    with_modifiers: HidModifiers,

    /// Modifiers pressed by the running compose action
    compose_modifiers: HidModifiers,

    /// A compose action is running, only its own modifiers apply
    macro_texting: bool,

    /// The compose action types an upper case char
    macro_caps: bool,

    /// Registered keycodes
    held_keycodes: [KeyCode; 6],

    /// Position of the key which registered each keycode, `None` for compose keystrokes
    registered_keys: [Option<(u8, u8)>; 6],

    mouse: MouseState,

    media_report: MediaKeyboardReport,

    /// Matrix state of the last scan
    matrix: [[bool; COL]; ROW],

    bootloader_requested: bool,
}

impl<'a, R: HidReporter, const ROW: usize, const COL: usize, const NUM_LAYER: usize> Keyboard<'a, R, ROW, COL, NUM_LAYER> {
    pub fn new(
        layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
        compose_actions: &'a [ComposeAction],
        behavior: BehaviorConfig,
        reporter: R,
    ) -> Self {
        let combos = ComboMatcher::new(&behavior.combo);
        Keyboard {
            keymap: KeyMap::new(layers),
            compose_actions,
            behavior,
            reporter,
            layers: ActiveLayerSet::new(),
            combos,
            pending_tap_hold: None,
            held_buffer: Deque::new(),
            osl_state: OneShotState::default(),
            osl_deadline: None,
            osl_key: None,
            caps_word: CapsWordState::default(),
            held_modifiers: HidModifiers::default(),
            with_modifiers: HidModifiers::default(),
            compose_modifiers: HidModifiers::default(),
            macro_texting: false,
            macro_caps: false,
            held_keycodes: [KeyCode::No; 6],
            registered_keys: [None; 6],
            mouse: MouseState::new(),
            media_report: MediaKeyboardReport { usage_id: 0 },
            matrix: [[false; COL]; ROW],
            bootloader_requested: false,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Current layer state
    pub fn layers(&self) -> &ActiveLayerSet {
        &self.layers
    }

    pub fn is_layer_active(&self, layer: u8) -> bool {
        self.layers.is_active(layer)
    }

    pub fn is_caps_word_active(&self) -> bool {
        self.caps_word.is_active()
    }

    /// Returns `true` once after a bootloader key was pressed
    pub fn take_bootloader_request(&mut self) -> bool {
        core::mem::take(&mut self.bootloader_requested)
    }

    /// The next time `tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.combos.deadline(),
            self.pending_tap_hold.map(|p| p.deadline()),
            self.osl_deadline,
            self.caps_word.deadline(self.behavior.caps_word.idle_timeout),
            self.mouse.next_repeat(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Diff a full matrix snapshot against the previous one and process the changes, row by row.
    pub fn scan(&mut self, now: Instant, matrix: &[[bool; COL]; ROW]) {
        for row in 0..ROW {
            for col in 0..COL {
                let pressed = matrix[row][col];
                if pressed != self.matrix[row][col] {
                    self.matrix[row][col] = pressed;
                    self.process_event(KeyEvent::new(row as u8, col as u8, pressed, now));
                }
            }
        }
        self.tick(now);
    }

    /// Process a key event. Timers which expire before the event are handled first.
    pub fn process_event(&mut self, event: KeyEvent) {
        debug!("Processing key event: {:?}", event);
        self.tick(event.time);
        let mut out = ComboOutputs::new();
        self.combos.process(event, self.layers.highest(), &mut out);
        for input in out {
            self.dispatch(input);
        }
    }

    /// Handle expired timers: combo window, tapping term, one shot timeout, caps word idle timeout and mouse repeat.
    pub fn tick(&mut self, now: Instant) {
        let mut out = ComboOutputs::new();
        self.combos.expire(now, self.layers.highest(), &mut out);
        for input in out {
            self.dispatch(input);
        }
        self.expire_tap_hold(now);
        self.expire_one_shot(now);
        self.expire_caps_word(now);
        self.repeat_mouse(now);
    }

    /// Pass a key event or a combo action through the tap-hold gate
    fn dispatch(&mut self, input: ComboOutput) {
        let event = match input {
            ComboOutput::Key(e) | ComboOutput::Combo(_, e) => e,
        };
        self.expire_tap_hold(event.time);

        if let Some(pending) = self.pending_tap_hold {
            if matches!(input, ComboOutput::Key(_)) && !event.pressed && pending.is_at(event) {
                self.resolve_tap(event);
            } else if self.held_buffer.push_back(input).is_err() {
                error!("Held buffer is full, dropping key event {:?}", event);
            }
            return;
        }

        match input {
            ComboOutput::Key(e) => {
                let key_action = self.keymap.get_action_with_layer_cache(&self.layers, e);
                self.process_key_action(key_action, e);
            }
            ComboOutput::Combo(key_action, e) => self.process_key_action(key_action, e),
        }
    }

    fn process_key_action(&mut self, key_action: KeyAction, key_event: KeyEvent) {
        match key_action {
            KeyAction::No | KeyAction::Transparent => (),
            KeyAction::Single(a) => self.process_action(a, key_event),
            KeyAction::OneShot(a) => self.process_key_action_oneshot(a, key_event),
            KeyAction::TapHold(tap_action, hold_action) => {
                self.process_key_action_tap_hold(key_action, tap_action, hold_action, key_event)
            }
        }
    }

    /// Run a single action
    fn process_action(&mut self, action: Action, key_event: KeyEvent) {
        match action {
            Action::No => (),
            Action::Key(key) => self.process_action_keycode(key, key_event),
            Action::Modifier(modifiers) => {
                if key_event.pressed {
                    self.register_modifiers(modifiers);
                } else {
                    self.unregister_modifiers(modifiers);
                }
                // Report the modifier press/release in its own hid report
                self.send_keyboard_report();
            }
            Action::KeyWithModifier(key, modifiers) => {
                if key_event.pressed {
                    self.with_modifiers |= modifiers.to_hid_modifiers();
                } else {
                    self.with_modifiers &= !modifiers.to_hid_modifiers();
                }
                self.process_action_keycode(key, key_event);
            }
            Action::LayerOn(layer_num) => {
                // Change layer state only when the key's state is changed
                if key_event.pressed {
                    self.layers.activate(layer_num);
                } else {
                    self.layers.deactivate(layer_num);
                }
            }
            Action::LayerToggle(layer_num) => {
                // Toggle a layer when the key is released
                if !key_event.pressed {
                    self.layers.toggle(layer_num);
                }
            }
            Action::LayerToggleOnly(layer_num) => {
                if key_event.pressed {
                    self.layers.only(layer_num);
                }
            }
            Action::Compose(id) => {
                if key_event.pressed {
                    if let Err(e) = self.dispatch_compose(id) {
                        error!("Compose action {} failed: {:?}", id, e);
                    }
                }
            }
            Action::CapsWord => {
                if key_event.pressed {
                    self.toggle_caps_word(key_event.time);
                }
            }
            Action::Bootloader => {
                if key_event.pressed {
                    info!("Bootloader requested");
                    self.bootloader_requested = true;
                }
            }
        }
        self.update_osl(key_event);
    }

    // Process a single keycode, a basic key, a modifier key, a media key or a mouse key.
    fn process_action_keycode(&mut self, key: KeyCode, key_event: KeyEvent) {
        if let Some(usage_id) = key.as_consumer_usage() {
            self.media_report.usage_id = if key_event.pressed { usage_id } else { 0 };
            self.send_report(Report::MediaKeyboardReport(MediaKeyboardReport {
                usage_id: self.media_report.usage_id,
            }));
        } else if key.is_mouse_key() {
            self.process_action_mouse(key, key_event);
        } else {
            if key_event.pressed {
                self.update_caps_word(key, key_event.time);
                self.register_key(key, key_event);
            } else {
                self.caps_word.clear_shift();
                self.unregister_key(key, key_event);
            }
            self.send_keyboard_report();
        }
    }

    /// Run the compose action at `id`.
    ///
    /// The whole action is expanded before anything is sent, a failing expansion sends nothing.
    /// Held keys and modifiers of the user don't apply while the action runs.
    pub fn dispatch_compose(&mut self, id: u8) -> Result<(), ComposeError> {
        let action = *self
            .compose_actions
            .get(id as usize)
            .ok_or(ComposeError::UnknownAction(id))?;
        let operations = action.expand()?;
        debug!("Running compose action {}", action.name);

        // Held keys are left out of the sequence, it always has all 6 slots
        let held_keycodes = core::mem::replace(&mut self.held_keycodes, [KeyCode::No; 6]);
        let registered_keys = core::mem::replace(&mut self.registered_keys, [None; 6]);
        self.macro_texting = true;
        for operation in operations {
            match operation {
                MacroOperation::Press(key) => {
                    self.press_compose_key(key);
                    self.send_keyboard_report();
                }
                MacroOperation::Release(key) => {
                    self.release_compose_key(key);
                    self.send_keyboard_report();
                }
                MacroOperation::Tap(key) => self.tap_compose_key(key),
                MacroOperation::Text(key, caps) => {
                    // Shift is released together with the char
                    self.macro_caps = caps;
                    self.press_compose_key(key);
                    self.send_keyboard_report();
                    self.macro_caps = false;
                    self.release_compose_key(key);
                    self.send_keyboard_report();
                }
            }
        }
        self.compose_modifiers = HidModifiers::new();
        self.macro_texting = false;
        self.held_keycodes = held_keycodes;
        self.registered_keys = registered_keys;

        // Restore what the user still holds
        if !self.resolve_modifiers().is_empty() || self.held_keycodes.iter().any(|&k| k != KeyCode::No) {
            self.send_keyboard_report();
        }
        Ok(())
    }

    fn tap_compose_key(&mut self, key: KeyCode) {
        self.press_compose_key(key);
        self.send_keyboard_report();
        self.release_compose_key(key);
        self.send_keyboard_report();
    }

    fn press_compose_key(&mut self, key: KeyCode) {
        if key.is_modifier() {
            self.compose_modifiers |= key.to_modifier_combination().to_hid_modifiers();
        } else {
            self.register_keycode(key, None);
        }
    }

    fn release_compose_key(&mut self, key: KeyCode) {
        if key.is_modifier() {
            self.compose_modifiers &= !key.to_modifier_combination().to_hid_modifiers();
        } else {
            self.unregister_keycode(key, None);
        }
    }

    /// Calculates the combined effect of all modifiers:
    /// - a running compose action only uses its own modifiers and capitalization
    /// - registered (held) modifiers
    /// - modifiers of pressed `KeyWithModifier` keys
    /// - caps word shift
    pub fn resolve_modifiers(&self) -> HidModifiers {
        if self.macro_texting {
            if self.macro_caps {
                return self.compose_modifiers | HidModifiers::new().with_left_shift(true);
            }
            return self.compose_modifiers;
        }

        let mut result = self.held_modifiers | self.with_modifiers;
        if self.caps_word.is_shifting() {
            result |= HidModifiers::new().with_left_shift(true);
        }
        result
    }

    fn send_report(&mut self, report: Report) {
        self.reporter.send_report(report);
    }

    pub(crate) fn send_keyboard_report(&mut self) {
        let report = KeyboardReport {
            modifier: self.resolve_modifiers().into_bits(),
            reserved: 0,
            leds: 0,
            keycodes: self.held_keycodes.map(|k| k as u8),
        };
        debug!("Sending keyboard report: {:?}", report);
        self.send_report(Report::KeyboardReport(report));
    }

    /// Register a key, the key can be a basic keycode or a modifier.
    fn register_key(&mut self, key: KeyCode, key_event: KeyEvent) {
        if key.is_modifier() {
            self.register_modifiers(key.to_modifier_combination());
        } else {
            self.register_keycode(key, Some((key_event.row, key_event.col)));
        }
    }

    /// Unregister a key, the key can be a basic keycode or a modifier.
    fn unregister_key(&mut self, key: KeyCode, key_event: KeyEvent) {
        if key.is_modifier() {
            self.unregister_modifiers(key.to_modifier_combination());
        } else {
            self.unregister_keycode(key, Some((key_event.row, key_event.col)));
        }
    }

    /// Register a key to be sent in hid report.
    fn register_keycode(&mut self, key: KeyCode, pos: Option<(u8, u8)>) {
        // First, find the key event slot according to the position
        let slot = pos.and_then(|p| self.registered_keys.iter().position(|k| *k == Some(p)));

        // If the slot is found, update the key in the slot.
        // Otherwise, find the first free slot
        if let Some(index) = slot.or_else(|| self.held_keycodes.iter().position(|&k| k == KeyCode::No)) {
            self.held_keycodes[index] = key;
            self.registered_keys[index] = pos;
        } else {
            warn!("Too many keys are pressed, dropping {:?}", key);
        }
    }

    /// Unregister a key from hid report.
    fn unregister_keycode(&mut self, key: KeyCode, pos: Option<(u8, u8)>) {
        let slot = pos.and_then(|p| self.registered_keys.iter().position(|k| *k == Some(p)));

        // Release the key in the position's slot, or the first same key
        if let Some(index) = slot.or_else(|| self.held_keycodes.iter().position(|&k| k == key)) {
            self.held_keycodes[index] = KeyCode::No;
            self.registered_keys[index] = None;
        }
    }

    /// Register a modifier combination to be sent in hid report.
    fn register_modifiers(&mut self, modifiers: ModifierCombination) {
        self.held_modifiers |= modifiers.to_hid_modifiers();
    }

    /// Unregister a modifier combination from hid report.
    fn unregister_modifiers(&mut self, modifiers: ModifierCombination) {
        self.held_modifiers &= !modifiers.to_hid_modifiers();
    }
}
