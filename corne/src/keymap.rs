use crate::action::KeyAction;
use crate::event::KeyEvent;
use crate::layer_state::ActiveLayerSet;

/// Keymap represents the stack of layers.
///
/// The layer tables are static: the keymap never changes them, it only resolves
/// `(layer set, row, col)` into the action that should run.
pub struct KeyMap<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    /// Layers
    layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Layer which served the press of each key, releases are resolved on it
    layer_cache: [[u8; COL]; ROW],
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> KeyMap<'a, ROW, COL, NUM_LAYER> {
    pub fn new(layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER]) -> Self {
        Self {
            layers,
            layer_cache: [[0; COL]; ROW],
        }
    }

    /// Fetch the action at the given position of one layer. Out-of-range indices yield `KeyAction::No`.
    pub fn get_action_at(&self, row: usize, col: usize, layer_num: usize) -> KeyAction {
        self.layers
            .get(layer_num)
            .and_then(|layer| layer.get(row))
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(KeyAction::No)
    }

    /// Resolve the action of a key for the given layer set.
    ///
    /// Active layers are searched from the highest down to the default layer, transparent
    /// actions fall through. A key which is transparent on every active layer resolves to
    /// `KeyAction::No`.
    pub fn resolve(&self, layers: &ActiveLayerSet, row: u8, col: u8) -> KeyAction {
        self.resolve_with_layer(layers, row, col).0
    }

    fn resolve_with_layer(&self, layers: &ActiveLayerSet, row: u8, col: u8) -> (KeyAction, u8) {
        let (row, col) = (row as usize, col as usize);
        if row >= ROW || col >= COL {
            warn!("Key ({}, {}) is out of the {}x{} matrix", row, col, ROW, COL);
            return (KeyAction::No, layers.default_layer());
        }
        for layer_idx in layers.iter_by_priority() {
            let Some(layer) = self.layers.get(layer_idx as usize) else {
                continue;
            };
            let action = layer[row][col];
            if action == KeyAction::Transparent {
                continue;
            }
            return (action, layer_idx);
        }
        (KeyAction::No, layers.default_layer())
    }

    /// Fetch the action of a key event, with layer cache.
    ///
    /// Presses are resolved against the layer set and remember the serving layer,
    /// releases are resolved on that layer even if the layer set changed meanwhile.
    pub(crate) fn get_action_with_layer_cache(&mut self, layers: &ActiveLayerSet, key_event: KeyEvent) -> KeyAction {
        let row = key_event.row as usize;
        let col = key_event.col as usize;
        if row >= ROW || col >= COL {
            warn!("Key ({}, {}) is out of the {}x{} matrix", row, col, ROW, COL);
            return KeyAction::No;
        }
        if !key_event.pressed {
            // Releasing a pressed key, use cached layer and restore the cache
            let layer = self.layer_cache[row][col];
            self.layer_cache[row][col] = layers.default_layer();
            return self.get_action_at(row, col, layer as usize);
        }
        let (action, layer) = self.resolve_with_layer(layers, key_event.row, key_event.col);
        self.layer_cache[row][col] = layer;
        action
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Instant;

    use super::*;
    use crate::{a, k, mo};

    const LAYERS: [[[KeyAction; 3]; 1]; 3] = [
        [[k!(A), mo!(1), k!(C)]],
        [[k!(Kc1), a!(Transparent), a!(Transparent)]],
        [[a!(Transparent), a!(Transparent), a!(No)]],
    ];

    #[test]
    fn test_transparent_falls_through() {
        let keymap = KeyMap::new(&LAYERS);
        let layers = ActiveLayerSet::with_layers(&[1, 2]);
        assert_eq!(keymap.resolve(&layers, 0, 0), k!(Kc1));
        assert_eq!(keymap.resolve(&layers, 0, 1), mo!(1));
        // `No` is a real action and does not fall through
        assert_eq!(keymap.resolve(&layers, 0, 2), a!(No));
        assert_eq!(keymap.resolve(&ActiveLayerSet::new(), 0, 2), k!(C));
    }

    #[test]
    fn test_out_of_matrix_resolves_to_no() {
        let keymap = KeyMap::new(&LAYERS);
        assert_eq!(keymap.resolve(&ActiveLayerSet::new(), 3, 0), a!(No));
        assert_eq!(keymap.resolve(&ActiveLayerSet::new(), 0, 9), a!(No));
    }

    #[test]
    fn test_release_uses_press_layer() {
        let mut keymap = KeyMap::new(&LAYERS);
        let mut layers = ActiveLayerSet::with_layers(&[1]);
        let press = KeyEvent::new(0, 0, true, Instant::from_millis(0));
        assert_eq!(keymap.get_action_with_layer_cache(&layers, press), k!(Kc1));
        layers.deactivate(1);
        let release = KeyEvent::new(0, 0, false, Instant::from_millis(10));
        assert_eq!(keymap.get_action_with_layer_cache(&layers, release), k!(Kc1));
    }
}
