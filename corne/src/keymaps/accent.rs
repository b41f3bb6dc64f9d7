//! Colemak-DH with bottom row mods. Accented chars live on a one shot accent layer, the
//! home row combos are modifiers and punctuation.

use heapless::Vec;

use super::{ACUTE, CEDILLA, CIRCUMFLEX, COMPOSE, GRAVE, TREMA, combo};
use crate::action::KeyAction;
use crate::combo::{COMBO_MAX_NUM, Combo};
use crate::compose::{ComposeAction, ComposeStep};
use crate::config::BehaviorConfig;
use crate::keyboard::Keyboard;
use crate::layout::{COL, ROW, split_3x6_3};
use crate::modifier::{ALT, CTRL, GUI, ModifierCombination, RCTRL, SHIFT};
use crate::report::HidReporter;
use crate::{a, boot, caps_word, cp, k, lt, mt, osl, shifted, wm};

pub const ALPHA: u8 = 0;
pub const NAV: u8 = 1;
pub const ACCENT: u8 = 2;
pub const NUM: u8 = 3;
pub const SYM: u8 = 4;
pub const FUN: u8 = 5;
pub const NUM_LAYER: usize = 6;

// Compose actions
pub const CP_QUOTE: u8 = 0;
pub const CP_CIRC: u8 = 1;
pub const CP_GRAVE: u8 = 2;
pub const CP_TREMA: u8 = 3;
pub const CP_A_GRAVE: u8 = 4;
pub const CP_CAPS_A_GRAVE: u8 = 5;
pub const CP_C_CEDILLA: u8 = 6;
pub const CP_CAPS_C_CEDILLA: u8 = 7;
pub const CP_E_ACUTE: u8 = 8;
pub const CP_E_GRAVE: u8 = 9;
pub const CP_E_CIRC: u8 = 10;
pub const CP_U_GRAVE: u8 = 11;
pub const CP_U_CIRC: u8 = 12;
pub const CP_I_CIRC: u8 = 13;
pub const CP_O_CIRC: u8 = 14;

pub static COMPOSE_ACTIONS: [ComposeAction; 15] = [
    ComposeAction::new("quote", &[COMPOSE, ACUTE]),
    ComposeAction::new("circ", &[COMPOSE, CIRCUMFLEX]),
    ComposeAction::new("grave", &[COMPOSE, GRAVE]),
    ComposeAction::new("trema", &[COMPOSE, TREMA]),
    ComposeAction::new("a_grave", &[COMPOSE, GRAVE, ComposeStep::Text("a")]),
    ComposeAction::new("caps_a_grave", &[COMPOSE, GRAVE, ComposeStep::Text("A")]),
    ComposeAction::new("c_cedilla", &[COMPOSE, CEDILLA, ComposeStep::Text("c")]),
    ComposeAction::new("caps_c_cedilla", &[COMPOSE, CEDILLA, ComposeStep::Text("C")]),
    ComposeAction::new("e_acute", &[COMPOSE, ACUTE, ComposeStep::Text("e")]),
    ComposeAction::new("e_grave", &[COMPOSE, GRAVE, ComposeStep::Text("e")]),
    ComposeAction::new("e_circ", &[COMPOSE, CIRCUMFLEX, ComposeStep::Text("e")]),
    ComposeAction::new("u_grave", &[COMPOSE, GRAVE, ComposeStep::Text("u")]),
    ComposeAction::new("u_circ", &[COMPOSE, CIRCUMFLEX, ComposeStep::Text("u")]),
    ComposeAction::new("i_circ", &[COMPOSE, CIRCUMFLEX, ComposeStep::Text("i")]),
    ComposeAction::new("o_circ", &[COMPOSE, CIRCUMFLEX, ComposeStep::Text("o")]),
];

/// Status line label of each layer
pub static LABELS: [&str; NUM_LAYER] = ["", "Navigation", "Accent", "Numbers", "Symbols", "Fn keys"];

const NU: KeyAction = a!(No);
const CTRL_SHIFT: ModifierCombination = ModifierCombination::new_from(false, false, false, true, true);

#[rustfmt::skip]
pub static KEYMAP: [[[KeyAction; COL]; ROW]; NUM_LAYER] = [
    // ALPHA
    split_3x6_3([
        NU, k!(Q),        k!(W),       k!(F),        k!(P),         k!(B), k!(J), k!(L),         k!(U),            k!(Y),          k!(Quote),        NU,
        NU, k!(A),        k!(R),       k!(S),        k!(T),         k!(G), k!(M), k!(N),         k!(E),            k!(I),          k!(O),            NU,
        NU, mt!(Z, GUI),  mt!(X, ALT), mt!(C, CTRL), mt!(D, SHIFT), k!(V), k!(K), mt!(H, SHIFT), mt!(Comma, CTRL), mt!(Dot, ALT),  mt!(Slash, GUI),  k!(F20),
        osl!(ACCENT), k!(Space), lt!(NAV, Tab), lt!(FUN, Enter), lt!(NUM, Backspace), osl!(SYM),
    ]),
    // NAV
    split_3x6_3([
        boot!(), NU,       NU,       NU,        NU,         NU,  k!(Again),    k!(AudioMute), k!(AudioVolDown), k!(AudioVolUp), NU,        NU,
        NU,      k!(LGui), k!(LAlt), k!(LCtrl), k!(LShift), NU,  k!(CapsLock), k!(Left),      k!(Down),         k!(Up),         k!(Right), NU,
        NU,      NU,       NU,       NU,        NU,         NU,  k!(Insert),   k!(Home),      k!(PageDown),     k!(PageUp),     k!(End),   NU,
        NU, NU, NU, NU, k!(Delete), NU,
    ]),
    // ACCENT
    split_3x6_3([
        NU, cp!(CP_CAPS_A_GRAVE), wm!(C, CTRL),  wm!(V, CTRL),         wm!(C, CTRL_SHIFT),        wm!(V, CTRL_SHIFT), NU, NU,              cp!(CP_U_GRAVE), cp!(CP_U_CIRC), NU,             NU,
        NU, cp!(CP_A_GRAVE),      cp!(CP_QUOTE), cp!(CP_GRAVE),        cp!(CP_CIRC),              cp!(CP_TREMA),      NU, cp!(CP_E_GRAVE), cp!(CP_E_ACUTE), cp!(CP_I_CIRC), cp!(CP_O_CIRC), NU,
        NU, NU,                   NU,            cp!(CP_C_CEDILLA),    cp!(CP_CAPS_C_CEDILLA),    NU,                 NU, NU,              cp!(CP_E_CIRC),  NU,             NU,             NU,
        NU, NU, NU, NU, NU, k!(ScrollLock),
    ]),
    // NUM
    split_3x6_3([
        NU, k!(LeftBracket), k!(Kc4), k!(Kc5), k!(Kc6), shifted!(Equal), NU, NU,         NU,        NU,       NU,       boot!(),
        NU, k!(Kc0),         k!(Kc1), k!(Kc2), k!(Kc3), k!(Dot),         NU, k!(LShift), k!(LCtrl), k!(LAlt), k!(LGui), NU,
        NU, k!(Comma),       k!(Kc7), k!(Kc8), k!(Kc9), k!(Equal),       NU, NU,         NU,        NU,       NU,       NU,
        NU, NU, NU, NU, NU, NU,
    ]),
    // SYM
    split_3x6_3([
        NU, NU,            shifted!(Kc7),         shifted!(Kc8),   NU,            shifted!(Equal), k!(Backslash),       NU,             NU,               NU,                    NU,                  boot!(),
        NU, k!(Semicolon), shifted!(LeftBracket), k!(LeftBracket), shifted!(Kc9), NU,              NU,                  shifted!(Kc0),  k!(RightBracket), shifted!(RightBracket), shifted!(Semicolon), NU,
        NU, k!(Grave),     shifted!(Kc1),         shifted!(Kc2),   shifted!(Kc3), k!(Equal),       shifted!(Backslash), shifted!(Kc6),  shifted!(Kc5),    shifted!(Kc4),         shifted!(Grave),     NU,
        NU, NU, NU, NU, NU, NU,
    ]),
    // FUN
    split_3x6_3([
        NU, k!(F12), k!(F4), k!(F5), k!(F6), NU, NU, NU,         NU,        NU,       NU,       boot!(),
        NU, k!(F11), k!(F1), k!(F2), k!(F3), NU, NU, k!(LShift), k!(LCtrl), k!(LAlt), k!(LGui), NU,
        NU, k!(F10), k!(F7), k!(F8), k!(F9), NU, NU, NU,         NU,        NU,       NU,       NU,
        NU, NU, NU, NU, NU, NU,
    ]),
];

/// Modifier and punctuation combos, only on the alpha layer
pub fn combos() -> Vec<Combo, COMBO_MAX_NUM> {
    Vec::from_iter([
        combo([(1, 7), (1, 8)], k!(LShift), ALPHA),
        combo([(1, 4), (1, 3)], k!(LShift), ALPHA),
        combo([(1, 9), (1, 8)], k!(LCtrl), ALPHA),
        combo([(1, 2), (1, 3)], k!(LCtrl), ALPHA),
        combo([(0, 8), (0, 9)], k!(Backspace), ALPHA),
        combo([(0, 10), (0, 9)], wm!(Backspace, RCTRL), ALPHA),
        combo([(1, 4), (1, 7)], shifted!(Minus), ALPHA),
        combo([(1, 8), (1, 3)], k!(Minus), ALPHA),
        combo([(1, 1), (1, 10)], k!(Grave), ALPHA),
        combo([(1, 2), (1, 9)], k!(Escape), ALPHA),
        combo([(0, 2), (0, 3)], caps_word!(), ALPHA),
        combo([(1, 7), (1, 9)], cp!(CP_E_ACUTE), ALPHA),
    ])
}

pub fn behavior_config() -> BehaviorConfig {
    let mut behavior = BehaviorConfig::default();
    behavior.combo.combos = combos();
    behavior
}

/// The keyboard with this keymap
pub fn keyboard<R: HidReporter>(reporter: R) -> Keyboard<'static, R, ROW, COL, NUM_LAYER> {
    Keyboard::new(&KEYMAP, &COMPOSE_ACTIONS, behavior_config(), reporter)
}
