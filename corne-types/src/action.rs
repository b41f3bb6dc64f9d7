use crate::keycode::KeyCode;
use crate::modifier::ModifierCombination;

/// A KeyAction is the action at a keyboard position, stored in a layer table.
/// It can be a single action like triggering a key, or a composite action like tap/hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action.
    No,
    /// Transparent action, next layer will be checked.
    Transparent,
    /// A single action, such as triggering a key, or activating a layer. Action is triggered when pressed and cancelled when released.
    Single(Action),
    /// One shot action, stays active until the next key is released.
    OneShot(Action),
    /// Tap hold action. The first action is triggered when the key is tapped, the second one when it's held past the tapping term.
    TapHold(Action, Action),
}

/// A single basic action that a keyboard can execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Default action, no action.
    No,
    /// A normal key stroke. Media and mouse keycodes go to their own reports.
    Key(KeyCode),
    /// Modifier combination, held while the key is held.
    Modifier(ModifierCombination),
    /// Key stroke with modifier combination triggered.
    KeyWithModifier(KeyCode, ModifierCombination),
    /// Activate a layer while the key is held
    LayerOn(u8),
    /// Toggle a layer
    LayerToggle(u8),
    /// Activate a layer and deactivate all other layers(except default layer)
    LayerToggleOnly(u8),
    /// Run the compose action at the given index of the keymap's compose table.
    Compose(u8),
    /// Toggle caps word
    CapsWord,
    /// Ask the firmware to jump to the bootloader
    Bootloader,
}
