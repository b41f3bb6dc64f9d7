/// The set of active layers.
///
/// The default layer is always present at the lowest priority. Other layers are
/// kept in a bitmask, the highest active index wins when resolving a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveLayerSet {
    state: u32,
    default_layer: u8,
}

impl ActiveLayerSet {
    /// Max number of layers a set can hold
    pub const MAX_LAYERS: u8 = 32;

    pub const fn new() -> Self {
        Self {
            state: 0,
            default_layer: 0,
        }
    }

    /// A set with the given layers active on top of default layer 0
    pub fn with_layers(layers: &[u8]) -> Self {
        let mut set = Self::new();
        for &layer in layers {
            set.activate(layer);
        }
        set
    }

    pub fn default_layer(&self) -> u8 {
        self.default_layer
    }

    pub fn set_default_layer(&mut self, layer: u8) {
        if layer >= Self::MAX_LAYERS {
            warn!("Not a valid default layer {}", layer);
            return;
        }
        self.default_layer = layer;
    }

    /// Is the layer active. The default layer is always active.
    pub fn is_active(&self, layer: u8) -> bool {
        layer == self.default_layer || (layer < Self::MAX_LAYERS && self.state & (1 << layer) != 0)
    }

    pub fn activate(&mut self, layer: u8) {
        if layer >= Self::MAX_LAYERS {
            warn!("Not a valid layer {}, at most {} layers are supported", layer, Self::MAX_LAYERS);
            return;
        }
        self.state |= 1 << layer;
    }

    pub fn deactivate(&mut self, layer: u8) {
        if layer >= Self::MAX_LAYERS {
            warn!("Not a valid layer {}, at most {} layers are supported", layer, Self::MAX_LAYERS);
            return;
        }
        self.state &= !(1 << layer);
    }

    pub fn toggle(&mut self, layer: u8) {
        if layer >= Self::MAX_LAYERS {
            warn!("Not a valid layer {}, at most {} layers are supported", layer, Self::MAX_LAYERS);
            return;
        }
        self.state ^= 1 << layer;
    }

    /// Deactivate every layer but the default one, then activate `layer`
    pub fn only(&mut self, layer: u8) {
        self.state = 0;
        if layer != self.default_layer {
            self.activate(layer);
        }
    }

    /// The active layer with the highest priority
    pub fn highest(&self) -> u8 {
        if self.state == 0 {
            return self.default_layer;
        }
        let top = (31 - self.state.leading_zeros()) as u8;
        top.max(self.default_layer)
    }

    /// Active layers, from the highest priority down to the default layer.
    pub fn iter_by_priority(&self) -> impl Iterator<Item = u8> + '_ {
        (0..Self::MAX_LAYERS)
            .rev()
            .filter(move |&layer| layer >= self.default_layer && self.is_active(layer))
    }
}
