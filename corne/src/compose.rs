//! Compose actions: short keystroke scripts which make the host's compose key produce
//! accented characters.
//!
//! The host is configured with ScrollLock as its compose key, so `é` is typed as
//! ScrollLock, `'`, `e`.

use heapless::Vec;

use crate::keycode::{KeyCode, from_ascii};

// Max number of primitive operations of one compose action
pub(crate) const COMPOSE_MAX_OPERATIONS: usize = 32;

/// The compose key of the host
pub const COMPOSE_KEY: KeyCode = KeyCode::ScrollLock;

/// One step of a compose action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComposeStep {
    /// Tap a key
    Tap(KeyCode),
    /// Type ascii text, shifting characters when needed
    Text(&'static str),
    /// Hold a modifier key while the inner steps run, then release it
    WithModifier(KeyCode, &'static [ComposeStep]),
}

/// A named sequence of compose steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComposeAction {
    pub name: &'static str,
    pub steps: &'static [ComposeStep],
}

impl ComposeAction {
    pub const fn new(name: &'static str, steps: &'static [ComposeStep]) -> Self {
        Self { name, steps }
    }

    /// Expand the action into primitive keyboard operations.
    ///
    /// Every `Press` of a modifier is followed by its `Release` in the same expansion.
    pub fn expand(&self) -> Result<Vec<MacroOperation, COMPOSE_MAX_OPERATIONS>, ComposeError> {
        let mut operations = Vec::new();
        expand_steps(self.steps, &mut operations)?;
        Ok(operations)
    }
}

/// Primitive keyboard operation of a compose action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroOperation {
    /// Press a key and keep it pressed
    Press(KeyCode),
    /// Release a pressed key
    Release(KeyCode),
    /// Press and release a key
    Tap(KeyCode),
    /// Tap a key, shifted if the bool is set
    Text(KeyCode, bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComposeError {
    /// The expansion doesn't fit in the operation buffer
    TooManyOperations,
    /// A text step contains a char which can't be typed
    UnsupportedChar(u8),
    /// No compose action with this index
    UnknownAction(u8),
}

fn push(operations: &mut Vec<MacroOperation, COMPOSE_MAX_OPERATIONS>, op: MacroOperation) -> Result<(), ComposeError> {
    operations.push(op).map_err(|_| ComposeError::TooManyOperations)
}

fn expand_steps(
    steps: &[ComposeStep],
    operations: &mut Vec<MacroOperation, COMPOSE_MAX_OPERATIONS>,
) -> Result<(), ComposeError> {
    for step in steps {
        match *step {
            ComposeStep::Tap(key) => push(operations, MacroOperation::Tap(key))?,
            ComposeStep::Text(text) => {
                for &c in text.as_bytes() {
                    let (key, shifted) = from_ascii(c);
                    if key == KeyCode::No {
                        return Err(ComposeError::UnsupportedChar(c));
                    }
                    push(operations, MacroOperation::Text(key, shifted))?;
                }
            }
            ComposeStep::WithModifier(modifier, inner) => {
                push(operations, MacroOperation::Press(modifier))?;
                expand_steps(inner, operations)?;
                push(operations, MacroOperation::Release(modifier))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREMA_E: ComposeAction = ComposeAction::new(
        "trema_e",
        &[
            ComposeStep::Tap(COMPOSE_KEY),
            ComposeStep::WithModifier(KeyCode::LShift, &[ComposeStep::Tap(KeyCode::Quote)]),
            ComposeStep::Text("e"),
        ],
    );

    #[test]
    fn test_expand_trema() {
        let ops = TREMA_E.expand().unwrap();
        assert_eq!(
            ops.as_slice(),
            &[
                MacroOperation::Tap(KeyCode::ScrollLock),
                MacroOperation::Press(KeyCode::LShift),
                MacroOperation::Tap(KeyCode::Quote),
                MacroOperation::Release(KeyCode::LShift),
                MacroOperation::Text(KeyCode::E, false),
            ]
        );
    }

    #[test]
    fn test_every_press_is_released() {
        const NESTED: ComposeAction = ComposeAction::new(
            "nested",
            &[ComposeStep::WithModifier(
                KeyCode::LCtrl,
                &[ComposeStep::WithModifier(KeyCode::LShift, &[ComposeStep::Text("C")])],
            )],
        );
        let ops = NESTED.expand().unwrap();
        let mut held: std::vec::Vec<KeyCode> = std::vec::Vec::new();
        for op in ops.iter() {
            match op {
                MacroOperation::Press(k) => held.push(*k),
                MacroOperation::Release(k) => assert_eq!(held.pop(), Some(*k)),
                _ => {}
            }
        }
        assert!(held.is_empty());
    }

    #[test]
    fn test_expand_errors() {
        const LONG: ComposeAction = ComposeAction::new("long", &[ComposeStep::Text("abcdefghijklmnopqrstuvwxyz0123456789")]);
        assert_eq!(LONG.expand(), Err(ComposeError::TooManyOperations));
        const BAD: ComposeAction = ComposeAction::new("bad", &[ComposeStep::Text("é")]);
        assert_eq!(BAD.expand(), Err(ComposeError::UnsupportedChar(0xC3)));
    }
}
