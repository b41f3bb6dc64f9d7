use embassy_time::Duration;
use heapless::Vec;

use crate::action::KeyAction;
use crate::combo::{COMBO_MAX_NUM, Combo};

// Max number of per-key tapping terms
pub(crate) const TAPPING_TERM_OVERRIDE_MAX_NUM: usize = 8;

/// Config for configurable action behavior
#[derive(Clone, Debug, Default)]
pub struct BehaviorConfig {
    pub tap_hold: TapHoldConfig,
    pub one_shot: OneShotConfig,
    pub combo: CombosConfig,
    pub caps_word: CapsWordConfig,
    pub mouse: MouseConfig,
}

/// Configurations for tap hold behavior
///
/// A tap-hold key is a tap when it's released before its tapping term, and a hold otherwise.
/// Other keys pressed in the meantime don't change the decision.
#[derive(Clone, Debug)]
pub struct TapHoldConfig {
    /// Default tapping term
    pub tapping_term: Duration,
    /// Tapping terms of specific tap-hold keys
    pub overrides: Vec<(KeyAction, Duration), TAPPING_TERM_OVERRIDE_MAX_NUM>,
}

impl Default for TapHoldConfig {
    fn default() -> Self {
        Self {
            tapping_term: Duration::from_millis(150),
            overrides: Vec::new(),
        }
    }
}

impl TapHoldConfig {
    /// Set the tapping term of one tap-hold key
    pub fn with_override(mut self, action: KeyAction, term: Duration) -> Self {
        if self.overrides.push((action, term)).is_err() {
            warn!("Too many tapping term overrides, {:?} uses the default term", action);
        }
        self
    }

    /// Tapping term of the given key
    pub fn tapping_term(&self, action: &KeyAction) -> Duration {
        self.overrides
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, term)| *term)
            .unwrap_or(self.tapping_term)
    }
}

/// Config for one shot behavior
#[derive(Clone, Copy, Debug)]
pub struct OneShotConfig {
    pub timeout: Duration,
}

impl Default for OneShotConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
        }
    }
}

/// Config for combo behavior
#[derive(Clone, Debug)]
pub struct CombosConfig {
    pub combos: Vec<Combo, COMBO_MAX_NUM>,
    /// All keys of a combo must be pressed within this window, counted from the first press
    pub timeout: Duration,
}

impl Default for CombosConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(50),
            combos: Vec::new(),
        }
    }
}

impl CombosConfig {
    /// Pairs of combo indices which share at least one key
    pub fn overlapping_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.combos.iter().enumerate().flat_map(move |(i, c1)| {
            self.combos
                .iter()
                .enumerate()
                .skip(i + 1)
                .filter(move |(_, c2)| c1.overlaps(c2))
                .map(move |(j, _)| (i, j))
        })
    }
}

/// Config for caps word
#[derive(Clone, Copy, Debug)]
pub struct CapsWordConfig {
    /// Caps word turns off after this long without a key press
    pub idle_timeout: Duration,
}

impl Default for CapsWordConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(5),
        }
    }
}

/// Config for mouse keys
#[derive(Clone, Copy, Debug)]
pub struct MouseConfig {
    /// Delay between the first movement and the repeat
    pub delay: Duration,
    /// Time between two movement reports while a key is held
    pub interval: Duration,
    /// Cursor step of the first movement
    pub move_delta: u8,
    /// Cursor step at full speed
    pub max_speed: u8,
    /// Number of repeats until full speed
    pub time_to_max: u8,
    pub wheel_delta: u8,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(0),
            interval: Duration::from_millis(8),
            move_delta: 8,
            max_speed: 10,
            time_to_max: 64,
            wheel_delta: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyPos;
    use crate::{k, mt};

    #[test]
    fn test_overlapping_pairs() {
        let config = CombosConfig {
            combos: Vec::from_iter([
                Combo::new([KeyPos::new(0, 0), KeyPos::new(0, 1)], k!(A), None),
                Combo::new([KeyPos::new(1, 0), KeyPos::new(1, 1)], k!(B), None),
                Combo::new([KeyPos::new(0, 1), KeyPos::new(1, 1)], k!(C), None),
            ]),
            ..Default::default()
        };
        let pairs: std::vec::Vec<_> = config.overlapping_pairs().collect();
        assert_eq!(pairs, [(0, 2), (1, 2)]);
    }

    #[test]
    fn test_tapping_term_override() {
        let config = TapHoldConfig::default().with_override(mt!(T, crate::modifier::SHIFT), Duration::from_millis(130));
        assert_eq!(config.tapping_term(&mt!(T, crate::modifier::SHIFT)), Duration::from_millis(130));
        assert_eq!(config.tapping_term(&mt!(T, crate::modifier::CTRL)), Duration::from_millis(150));
    }
}
