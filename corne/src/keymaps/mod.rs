//! Keymaps shipped with the crate: the crkbd Colemak-DH keymap with accent combos and
//! its variant with a one shot accent layer.
//!
//! Accented chars go through the compose key of the host, each accent is the compose key
//! followed by the accent's key.

pub mod accent;
pub mod crkbd;

use crate::action::KeyAction;
use crate::combo::Combo;
use crate::compose::{COMPOSE_KEY, ComposeStep};
use crate::keycode::KeyCode;
use crate::layout::split_3x6_3_pos;

pub(crate) const COMPOSE: ComposeStep = ComposeStep::Tap(COMPOSE_KEY);

/// ´
pub(crate) const ACUTE: ComposeStep = ComposeStep::Tap(KeyCode::Quote);
/// ^
pub(crate) const CIRCUMFLEX: ComposeStep = ComposeStep::Text("^");
/// `
pub(crate) const GRAVE: ComposeStep = ComposeStep::Tap(KeyCode::Grave);
/// ¨, shift is held for the quote only
pub(crate) const TREMA: ComposeStep = ComposeStep::WithModifier(KeyCode::LShift, &[ComposeStep::Tap(KeyCode::Quote)]);
/// ¸
pub(crate) const CEDILLA: ComposeStep = ComposeStep::Tap(KeyCode::Comma);

/// A combo of keys given in the logical grid, enabled on `layer` only
pub(crate) fn combo<const N: usize>(keys: [(u8, u8); N], output: KeyAction, layer: u8) -> Combo {
    Combo::new(keys.map(|(row, col)| split_3x6_3_pos(row, col)), output, Some(layer))
}
