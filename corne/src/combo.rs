use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::action::KeyAction;
use crate::config::CombosConfig;
use crate::event::{KeyEvent, KeyPos};

// Max number of combos
pub(crate) const COMBO_MAX_NUM: usize = 16;
// Max size of combos
pub(crate) const COMBO_MAX_LENGTH: usize = 4;
// Max number of items a single event can produce: a flushed buffer plus the event itself
pub(crate) const COMBO_OUTPUT_MAX: usize = COMBO_MAX_LENGTH + 2;

/// A key chord. When all keys are pressed within the combo timeout, the output action
/// runs instead of the actions of the keys.
#[derive(Clone, Debug)]
pub struct Combo {
    pub(crate) keys: Vec<KeyPos, COMBO_MAX_LENGTH>,
    pub(crate) output: KeyAction,
    /// The combo only fires when this layer is the highest active one
    pub(crate) layer: Option<u8>,
    /// Bitmask of members still held since the combo fired
    held: u8,
    triggered: bool,
    output_released: bool,
}

impl Combo {
    pub fn new<I: IntoIterator<Item = KeyPos>>(keys: I, output: KeyAction, layer: Option<u8>) -> Self {
        Self {
            keys: Vec::from_iter(keys),
            output,
            layer,
            held: 0,
            triggered: false,
            output_released: false,
        }
    }

    pub fn keys(&self) -> &[KeyPos] {
        &self.keys
    }

    pub fn output(&self) -> KeyAction {
        self.output
    }

    pub fn contains(&self, pos: KeyPos) -> bool {
        self.keys.contains(&pos)
    }

    /// Two combos overlap when they share a member key
    pub fn overlaps(&self, other: &Combo) -> bool {
        self.keys.iter().any(|&k| other.contains(k))
    }

    pub(crate) fn is_triggered(&self) -> bool {
        self.triggered
    }

    fn is_enabled(&self, active_layer: u8) -> bool {
        !self.triggered && self.layer.is_none_or(|layer| layer == active_layer)
    }

    /// Does the combo still match after the given keys were pressed
    fn accepts(&self, pressed: impl Iterator<Item = KeyPos>) -> bool {
        let mut count = 0;
        for pos in pressed {
            if !self.contains(pos) {
                return false;
            }
            count += 1;
        }
        count <= self.keys.len()
    }

    fn trigger(&mut self) -> KeyAction {
        self.triggered = true;
        self.output_released = false;
        self.held = (1 << self.keys.len()) - 1;
        self.output
    }

    fn holds(&self, pos: KeyPos) -> bool {
        self.triggered
            && self
                .keys
                .iter()
                .position(|&k| k == pos)
                .is_some_and(|i| self.held & (1 << i) != 0)
    }

    /// Release a member of a triggered combo.
    /// Returns the output action for the first released member, the combo re-arms once all members are up.
    fn release(&mut self, pos: KeyPos) -> Option<KeyAction> {
        if let Some(i) = self.keys.iter().position(|&k| k == pos) {
            self.held &= !(1 << i);
        }
        let output = if self.output_released {
            None
        } else {
            self.output_released = true;
            Some(self.output)
        };
        if self.held == 0 {
            self.reset();
        }
        output
    }

    pub(crate) fn reset(&mut self) {
        self.held = 0;
        self.triggered = false;
        self.output_released = false;
    }
}

/// What the combo stage hands to the rest of the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ComboOutput {
    /// A key event which is not (or no longer) part of a combo
    Key(KeyEvent),
    /// Press or release of a combo's output action
    Combo(KeyAction, KeyEvent),
}

pub(crate) type ComboOutputs = Vec<ComboOutput, COMBO_OUTPUT_MAX>;

fn push_output(out: &mut ComboOutputs, output: ComboOutput) {
    if out.push(output).is_err() {
        error!("Combo output buffer overflowed! This is a bug and should not happen!");
    }
}

/// Matches raw key events against the combo table.
///
/// Presses of combo members are held back until a combo completes, the chord can no
/// longer complete, or the combo timeout (counted from the first held back press)
/// expires. Held back presses which end up not forming a combo are handed on in their
/// original order with their original timestamps.
pub(crate) struct ComboMatcher {
    combos: Vec<Combo, COMBO_MAX_NUM>,
    timeout: Duration,
    buffer: Vec<KeyEvent, COMBO_MAX_LENGTH>,
}

impl ComboMatcher {
    pub(crate) fn new(config: &CombosConfig) -> Self {
        let mut combos = config.combos.clone();
        // Stable sort by length, so that larger chords are checked first
        for i in 1..combos.len() {
            let mut j = i;
            while j > 0 && combos[j - 1].keys.len() < combos[j].keys.len() {
                combos.swap(j - 1, j);
                j -= 1;
            }
        }
        for (i, j) in config.overlapping_pairs() {
            warn!("Combo #{} and combo #{} share keys, the first completed chord wins", i, j);
        }
        Self {
            combos,
            timeout: config.timeout,
            buffer: Vec::new(),
        }
    }

    pub(crate) fn combos(&self) -> &[Combo] {
        &self.combos
    }

    /// When the pending chord gives up, if there is one
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.buffer.first().map(|e| e.time + self.timeout)
    }

    /// Resolve the pending chord if its window has elapsed at `now`
    pub(crate) fn expire(&mut self, now: Instant, active_layer: u8, out: &mut ComboOutputs) {
        if let Some(deadline) = self.deadline() {
            if now >= deadline {
                debug!("Combo window expired at {:?}", deadline);
                self.resolve(deadline, active_layer, out);
            }
        }
    }

    pub(crate) fn process(&mut self, event: KeyEvent, active_layer: u8, out: &mut ComboOutputs) {
        self.expire(event.time, active_layer, out);
        let pos = event.pos();

        if !event.pressed {
            if self.release_member(event, out) {
                return;
            }
            if !self.buffer.is_empty() {
                self.resolve(event.time, active_layer, out);
                if self.release_member(event, out) {
                    return;
                }
            }
            push_output(out, ComboOutput::Key(event));
            return;
        }

        if !self.buffer.is_empty() && !self.has_candidate(Some(pos), active_layer) {
            self.resolve(event.time, active_layer, out);
        }
        if self.buffer.is_empty() && !self.has_candidate(Some(pos), active_layer) {
            push_output(out, ComboOutput::Key(event));
            return;
        }
        if self.buffer.push(event).is_err() {
            error!("Combo buffer overflowed! This is a bug and should not happen!");
            self.resolve(event.time, active_layer, out);
            push_output(out, ComboOutput::Key(event));
            return;
        }

        // Fire as soon as no larger chord can complete
        if !self.has_larger_candidate(active_layer) {
            if let Some(idx) = self.completed(active_layer) {
                self.fire(idx, event.time, out);
            }
        }
    }

    /// Release of a member of a fired combo
    fn release_member(&mut self, event: KeyEvent, out: &mut ComboOutputs) -> bool {
        let pos = event.pos();
        let Some(combo) = self.combos.iter_mut().find(|c| c.holds(pos)) else {
            return false;
        };
        let first = combo.keys[0];
        if let Some(output) = combo.release(pos) {
            debug!("Combo {:?} released", output);
            push_output(
                out,
                ComboOutput::Combo(output, KeyEvent::new(first.row, first.col, false, event.time)),
            );
        }
        true
    }

    fn buffered(&self) -> impl Iterator<Item = KeyPos> + '_ {
        self.buffer.iter().map(|e| e.pos())
    }

    fn has_candidate(&self, pos: Option<KeyPos>, active_layer: u8) -> bool {
        self.combos
            .iter()
            .filter(|c| c.is_enabled(active_layer))
            .any(|c| c.accepts(self.buffered().chain(pos)))
    }

    fn has_larger_candidate(&self, active_layer: u8) -> bool {
        self.combos
            .iter()
            .filter(|c| c.is_enabled(active_layer) && c.keys.len() > self.buffer.len())
            .any(|c| c.accepts(self.buffered()))
    }

    /// The largest combo whose keys are exactly the pressed ones
    fn completed(&self, active_layer: u8) -> Option<usize> {
        self.combos.iter().position(|c| {
            c.is_enabled(active_layer) && c.keys.len() == self.buffer.len() && c.accepts(self.buffered())
        })
    }

    fn fire(&mut self, idx: usize, time: Instant, out: &mut ComboOutputs) {
        self.buffer.clear();
        let combo = &mut self.combos[idx];
        let first = combo.keys[0];
        let output = combo.trigger();
        debug!("Combo {:?} matched", output);
        push_output(
            out,
            ComboOutput::Combo(output, KeyEvent::new(first.row, first.col, true, time)),
        );
    }

    /// Fire the completed combo if there is one, otherwise hand on the held back presses
    fn resolve(&mut self, time: Instant, active_layer: u8, out: &mut ComboOutputs) {
        if self.buffer.is_empty() {
            return;
        }
        if let Some(idx) = self.completed(active_layer) {
            self.fire(idx, time, out);
            return;
        }
        for event in self.buffer.iter() {
            debug!("Dispatching held back key ({}, {})", event.row, event.col);
            push_output(out, ComboOutput::Key(*event));
        }
        self.buffer.clear();
    }
}
