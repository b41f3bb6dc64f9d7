//! Colemak-DH with home row mods and thumb layers, accents are typed with combos on the home row.

use embassy_time::Duration;
use heapless::Vec;

use super::{ACUTE, CEDILLA, CIRCUMFLEX, COMPOSE, GRAVE, TREMA, combo};
use crate::action::KeyAction;
use crate::combo::{COMBO_MAX_NUM, Combo};
use crate::compose::{ComposeAction, ComposeStep};
use crate::config::{BehaviorConfig, TapHoldConfig};
use crate::keyboard::Keyboard;
use crate::layout::{COL, ROW, split_3x6_3};
use crate::modifier::{ALT, CTRL, GUI, RALT, SHIFT};
use crate::report::HidReporter;
use crate::{a, boot, caps_word, cp, k, lt, mt, shifted, tg, to};

pub const ALPHA: u8 = 0;
pub const NAV: u8 = 1;
pub const MOUSE: u8 = 2;
pub const MEDIA: u8 = 3;
pub const NUM: u8 = 4;
pub const SYM: u8 = 5;
pub const FUN: u8 = 6;
pub const GAME_ALPHA: u8 = 7;
pub const GAME_NUM: u8 = 8;
pub const GAME_FUN: u8 = 9;
pub const NUM_LAYER: usize = 10;

// Compose actions
pub const CP_QUOTE: u8 = 0;
pub const CP_E_ACUTE: u8 = 1;
pub const CP_GRAVE: u8 = 2;
pub const CP_CIRC: u8 = 3;
pub const CP_CEDILLA: u8 = 4;
pub const CP_DOUBLE_QUOTE: u8 = 5;
pub const CP_UNDERSCORE: u8 = 6;
pub const CP_DASH: u8 = 7;

pub static COMPOSE_ACTIONS: [ComposeAction; 8] = [
    ComposeAction::new("quote", &[COMPOSE, ACUTE]),
    ComposeAction::new("e_acute", &[COMPOSE, ACUTE, ComposeStep::Text("e")]),
    ComposeAction::new("grave", &[COMPOSE, GRAVE]),
    ComposeAction::new("circ", &[COMPOSE, CIRCUMFLEX]),
    ComposeAction::new("cedilla", &[COMPOSE, CEDILLA]),
    ComposeAction::new("double_quote", &[COMPOSE, TREMA]),
    ComposeAction::new("underscore", &[ComposeStep::Text("_")]),
    ComposeAction::new("dash", &[ComposeStep::Text("-")]),
];

/// Status line label of each layer
pub static LABELS: [&str; NUM_LAYER] = [
    "",
    "Navigation",
    "Mouse",
    "Media",
    "Numbers",
    "Symbols",
    "Fn keys",
    "GAMING",
    "GAMING",
    "GAMING",
];

// Unused key
const NU: KeyAction = a!(No);

#[rustfmt::skip]
pub static KEYMAP: [[[KeyAction; COL]; ROW]; NUM_LAYER] = [
    // ALPHA
    split_3x6_3([
        NU,     k!(Q),        k!(W),        k!(F),         k!(P),          k!(B),  k!(J), k!(L),          k!(U),         k!(Y),          k!(Quote),    NU,
        NU,     mt!(A, GUI),  mt!(R, ALT),  mt!(S, CTRL),  mt!(T, SHIFT),  k!(G),  k!(M), mt!(N, SHIFT),  mt!(E, CTRL),  mt!(I, ALT),    mt!(O, GUI),  NU,
        NU,     k!(Z),        mt!(X, RALT), k!(C),         k!(D),          k!(V),  k!(K), k!(H),          k!(Comma),     mt!(Dot, RALT), k!(Slash),    NU,
        lt!(MEDIA, Escape), lt!(NAV, Space), lt!(MOUSE, Tab), lt!(SYM, Enter), lt!(NUM, Backspace), lt!(FUN, Delete),
    ]),
    // NAV
    split_3x6_3([
        boot!(), NU,       NU,       NU,        NU,         NU,  k!(Again),    k!(Paste), k!(Copy),     k!(Cut),    k!(Undo),  NU,
        NU,      k!(LGui), k!(LAlt), k!(LCtrl), k!(LShift), NU,  k!(CapsLock), k!(Left),  k!(Down),     k!(Up),     k!(Right), NU,
        NU,      NU,       k!(RAlt), NU,        NU,         NU,  k!(Insert),   k!(Home),  k!(PageDown), k!(PageUp), k!(End),   tg!(NAV),
        NU, NU, NU, k!(Enter), k!(Backspace), k!(Delete),
    ]),
    // MOUSE
    split_3x6_3([
        boot!(), NU,       NU,       NU,        NU,         NU,  k!(Again), k!(Paste),          k!(Copy),           k!(Cut),          k!(Undo),            NU,
        NU,      k!(LGui), k!(LAlt), k!(LCtrl), k!(LShift), NU,  NU,        k!(MouseLeft),      k!(MouseDown),      k!(MouseUp),      k!(MouseRight),      NU,
        NU,      NU,       k!(RAlt), NU,        NU,         NU,  NU,        k!(MouseWheelLeft), k!(MouseWheelDown), k!(MouseWheelUp), k!(MouseWheelRight), NU,
        NU, NU, NU, k!(MouseBtn1), k!(MouseBtn3), k!(MouseBtn2),
    ]),
    // MEDIA
    split_3x6_3([
        boot!(), NU,       NU,       NU,        NU,         NU,  NU, NU,                 NU,               NU,             NU,                 to!(GAME_ALPHA),
        NU,      k!(LGui), k!(LAlt), k!(LCtrl), k!(LShift), NU,  NU, k!(MediaPrevTrack), k!(AudioVolDown), k!(AudioVolUp), k!(MediaNextTrack), NU,
        NU,      NU,       k!(RAlt), NU,        NU,         NU,  NU, NU,                 NU,               NU,             NU,                 NU,
        NU, NU, NU, k!(MediaStop), k!(MediaPlayPause), k!(AudioMute),
    ]),
    // NUM
    split_3x6_3([
        NU, k!(LeftBracket), k!(Kc7), k!(Kc8), k!(Kc9), k!(RightBracket), NU, NU,         NU,        NU,       NU,       boot!(),
        NU, k!(Semicolon),   k!(Kc4), k!(Kc5), k!(Kc6), k!(Equal),        NU, k!(LShift), k!(LCtrl), k!(LAlt), k!(LGui), NU,
        NU, k!(Grave),       k!(Kc1), k!(Kc2), k!(Kc3), k!(Backslash),    NU, NU,         NU,        k!(RAlt), NU,       NU,
        k!(Dot), k!(Kc0), k!(Minus), NU, NU, NU,
    ]),
    // SYM
    split_3x6_3([
        NU, shifted!(LeftBracket), shifted!(Kc7), shifted!(Kc8), shifted!(Kc9), shifted!(RightBracket), NU, NU,         NU,        NU,       NU,       boot!(),
        NU, shifted!(Semicolon),   shifted!(Kc4), shifted!(Kc5), shifted!(Kc6), shifted!(Equal),        NU, k!(LShift), k!(LCtrl), k!(LAlt), k!(LGui), NU,
        NU, shifted!(Grave),       shifted!(Kc1), shifted!(Kc2), shifted!(Kc3), shifted!(Backslash),    NU, NU,         NU,        k!(RAlt), NU,       NU,
        shifted!(Kc9), shifted!(Kc0), shifted!(Minus), NU, NU, NU,
    ]),
    // FUN
    split_3x6_3([
        NU, k!(F12), k!(F7), k!(F8), k!(F9), k!(PrintScreen), NU, NU,         NU,        NU,       NU,       boot!(),
        NU, k!(F11), k!(F4), k!(F5), k!(F6), k!(ScrollLock),  NU, k!(LShift), k!(LCtrl), k!(LAlt), k!(LGui), NU,
        NU, k!(F10), k!(F1), k!(F2), k!(F3), k!(Pause),       NU, NU,         NU,        k!(RAlt), NU,       tg!(NAV),
        k!(Application), k!(Space), k!(Tab), NU, NU, NU,
    ]),
    // GAME_ALPHA
    split_3x6_3([
        k!(T), k!(Tab),    k!(Q), k!(W), k!(E), k!(R), k!(T), k!(Y), k!(U), k!(I),     k!(O),   k!(P),
        k!(G), k!(LShift), k!(A), k!(S), k!(D), k!(F), k!(G), k!(H), k!(J), k!(K),     k!(L),   k!(M),
        k!(B), k!(LCtrl),  k!(Z), k!(X), k!(C), k!(V), k!(B), k!(N), k!(M), k!(Comma), k!(Dot), NU,
        lt!(GAME_FUN, Escape), k!(Space), lt!(GAME_NUM, Tab), k!(Enter), k!(Backspace), mt!(Delete, ALT),
    ]),
    // GAME_NUM
    split_3x6_3([
        NU, NU, k!(Kc4), k!(Kc5), k!(Kc6), NU,      NU, NU, NU, NU, NU, to!(ALPHA),
        NU, NU, k!(Kc1), k!(Kc2), k!(Kc3), k!(Kc0), NU, NU, NU, NU, NU, NU,
        NU, NU, k!(Kc7), k!(Kc8), k!(Kc9), NU,      NU, NU, NU, NU, NU, NU,
        NU, NU, NU, NU, NU, NU,
    ]),
    // GAME_FUN
    split_3x6_3([
        NU, NU, k!(F4), k!(F5), k!(F6), NU,      NU, NU, NU, NU, NU, to!(ALPHA),
        NU, NU, k!(F1), k!(F2), k!(F3), k!(F10), NU, NU, NU, NU, NU, NU,
        NU, NU, k!(F7), k!(F8), k!(F9), NU,      NU, NU, NU, NU, NU, NU,
        NU, NU, NU, NU, NU, NU,
    ]),
];

// Home row columns of the keys used in combos
const R_KEY: u8 = 2;
const S_KEY: u8 = 3;
const T_KEY: u8 = 4;
const N_KEY: u8 = 7;
const E_KEY: u8 = 8;
const I_KEY: u8 = 9;

/// Accent and punctuation combos on the home row mods, only on the alpha layer
pub fn combos() -> Vec<Combo, COMBO_MAX_NUM> {
    Vec::from_iter([
        combo([(1, R_KEY), (1, S_KEY)], cp!(CP_QUOTE), ALPHA),
        combo([(1, N_KEY), (1, E_KEY), (1, I_KEY)], cp!(CP_E_ACUTE), ALPHA),
        combo([(1, S_KEY), (1, T_KEY)], cp!(CP_GRAVE), ALPHA),
        combo([(1, N_KEY), (1, E_KEY)], cp!(CP_GRAVE), ALPHA),
        combo([(1, R_KEY), (1, T_KEY)], cp!(CP_CIRC), ALPHA),
        combo([(1, I_KEY), (1, E_KEY)], cp!(CP_CEDILLA), ALPHA),
        combo([(1, R_KEY), (1, S_KEY), (1, T_KEY)], cp!(CP_DOUBLE_QUOTE), ALPHA),
        combo([(1, T_KEY), (1, N_KEY)], cp!(CP_UNDERSCORE), ALPHA),
        combo([(1, S_KEY), (1, E_KEY)], cp!(CP_DASH), ALPHA),
        combo([(1, R_KEY), (1, I_KEY)], caps_word!(), ALPHA),
    ])
}

pub fn behavior_config() -> BehaviorConfig {
    let mut behavior = BehaviorConfig::default();
    // Shift mod-taps are rolled into the next key quicker than the other mods
    behavior.tap_hold = TapHoldConfig::default()
        .with_override(mt!(T, SHIFT), Duration::from_millis(130))
        .with_override(mt!(N, SHIFT), Duration::from_millis(130));
    behavior.combo.combos = combos();
    behavior
}

/// The keyboard with this keymap
pub fn keyboard<R: HidReporter>(reporter: R) -> Keyboard<'static, R, ROW, COL, NUM_LAYER> {
    Keyboard::new(&KEYMAP, &COMPOSE_ACTIONS, behavior_config(), reporter)
}
