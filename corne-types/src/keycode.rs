use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::ModifierCombination;

/// Keyboard page usages (HID usage table page 0x07) used by the keymaps,
/// plus the mouse key range that is kept in the same byte space.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Reserved, no-key.
    No = 0x00,
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    /// `1` and `!`
    Kc1 = 0x1E,
    /// `2` and `@`
    Kc2 = 0x1F,
    /// `3` and `#`
    Kc3 = 0x20,
    /// `4` and `$`
    Kc4 = 0x21,
    /// `5` and `%`
    Kc5 = 0x22,
    /// `6` and `^`
    Kc6 = 0x23,
    /// `7` and `&`
    Kc7 = 0x24,
    /// `8` and `*`
    Kc8 = 0x25,
    /// `9` and `(`
    Kc9 = 0x26,
    /// `0` and `)`
    Kc0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    /// `-` and `_`
    Minus = 0x2D,
    /// `=` and `+`
    Equal = 0x2E,
    /// `[` and `{`
    LeftBracket = 0x2F,
    /// `]` and `}`
    RightBracket = 0x30,
    /// `\` and `|`
    Backslash = 0x31,
    /// `;` and `:`
    Semicolon = 0x33,
    /// `'` and `"`
    Quote = 0x34,
    /// `` ` `` and `~`
    Grave = 0x35,
    /// `,` and `<`
    Comma = 0x36,
    /// `.` and `>`
    Dot = 0x37,
    /// `/` and `?`
    Slash = 0x38,
    CapsLock = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    /// The compose key of the host, see the compose dispatcher.
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    /// The context menu key.
    Application = 0x65,
    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,
    F16 = 0x6B,
    F17 = 0x6C,
    F18 = 0x6D,
    F19 = 0x6E,
    /// Bound to "mute microphone" on the host.
    F20 = 0x6F,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,
    /// Redo
    Again = 0x79,
    Undo = 0x7A,
    Cut = 0x7B,
    Copy = 0x7C,
    Paste = 0x7D,
    // Consumer keys, reported through the media report
    AudioMute = 0xA8,
    AudioVolUp = 0xA9,
    AudioVolDown = 0xAA,
    MediaNextTrack = 0xAB,
    MediaPrevTrack = 0xAC,
    MediaStop = 0xAD,
    MediaPlayPause = 0xAE,
    // Mouse keys, reported through the mouse report
    MouseUp = 0xCD,
    MouseDown = 0xCE,
    MouseLeft = 0xCF,
    MouseRight = 0xD0,
    MouseBtn1 = 0xD1,
    MouseBtn2 = 0xD2,
    MouseBtn3 = 0xD3,
    MouseWheelUp = 0xD9,
    MouseWheelDown = 0xDA,
    MouseWheelLeft = 0xDB,
    MouseWheelRight = 0xDC,
    LCtrl = 0xE0,
    LShift = 0xE1,
    LAlt = 0xE2,
    LGui = 0xE3,
    RCtrl = 0xE4,
    RShift = 0xE5,
    RAlt = 0xE6,
    RGui = 0xE7,
}

impl KeyCode {
    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns `true` if the keycode is a mouse keycode
    pub fn is_mouse_key(self) -> bool {
        KeyCode::MouseUp <= self && self <= KeyCode::MouseWheelRight
    }

    /// Returns `true` if the keycode goes to the consumer page instead of the keyboard report
    pub fn is_consumer(self) -> bool {
        self.as_consumer_usage().is_some()
    }

    /// Modifier bits of a modifier keycode, empty for other keycodes.
    pub fn to_modifier_combination(self) -> ModifierCombination {
        match self {
            KeyCode::LCtrl => ModifierCombination::new().with_ctrl(true),
            KeyCode::LShift => ModifierCombination::new().with_shift(true),
            KeyCode::LAlt => ModifierCombination::new().with_alt(true),
            KeyCode::LGui => ModifierCombination::new().with_gui(true),
            KeyCode::RCtrl => ModifierCombination::new().with_ctrl(true).with_right(true),
            KeyCode::RShift => ModifierCombination::new().with_shift(true).with_right(true),
            KeyCode::RAlt => ModifierCombination::new().with_alt(true).with_right(true),
            KeyCode::RGui => ModifierCombination::new().with_gui(true).with_right(true),
            _ => ModifierCombination::new(),
        }
    }

    /// Does current keycode continues Caps Word?
    pub fn is_caps_word_continue_key(self) -> bool {
        if self >= KeyCode::A && self <= KeyCode::Z {
            return true;
        }
        if self >= KeyCode::Kc1 && self <= KeyCode::Kc0 {
            return true;
        }
        matches!(self, KeyCode::Minus | KeyCode::Backspace | KeyCode::Delete)
    }

    /// Does current keycode is to be shifted by Caps Word?
    pub fn is_caps_word_shifted_key(self) -> bool {
        (self >= KeyCode::A && self <= KeyCode::Z) || self == KeyCode::Minus
    }

    /// Usage id on the consumer page (0x0C) for media keys.
    pub fn as_consumer_usage(self) -> Option<u16> {
        match self {
            KeyCode::AudioMute => Some(0xE2),
            KeyCode::AudioVolUp => Some(0xE9),
            KeyCode::AudioVolDown => Some(0xEA),
            KeyCode::MediaNextTrack => Some(0xB5),
            KeyCode::MediaPrevTrack => Some(0xB6),
            KeyCode::MediaStop => Some(0xB7),
            KeyCode::MediaPlayPause => Some(0xCD),
            _ => None,
        }
    }
}

impl From<u8> for KeyCode {
    fn from(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(KeyCode::No)
    }
}

/// Convert an ascii char to keycode, the bool tells if the keycode should be shifted.
/// Assumes en-us keyboard mapping, unsupported chars map to `KeyCode::No`.
pub fn from_ascii(ascii: u8) -> (KeyCode, bool) {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Kc0,
        KeyCode::Kc1,
        KeyCode::Kc2,
        KeyCode::Kc3,
        KeyCode::Kc4,
        KeyCode::Kc5,
        KeyCode::Kc6,
        KeyCode::Kc7,
        KeyCode::Kc8,
        KeyCode::Kc9,
    ];

    match ascii {
        b'a'..=b'z' => (LETTERS[(ascii - b'a') as usize], false),
        b'A'..=b'Z' => (LETTERS[(ascii - b'A') as usize], true),
        b'0'..=b'9' => (DIGITS[(ascii - b'0') as usize], false),
        b'!' => (KeyCode::Kc1, true),
        b'@' => (KeyCode::Kc2, true),
        b'#' => (KeyCode::Kc3, true),
        b'$' => (KeyCode::Kc4, true),
        b'%' => (KeyCode::Kc5, true),
        b'^' => (KeyCode::Kc6, true),
        b'&' => (KeyCode::Kc7, true),
        b'*' => (KeyCode::Kc8, true),
        b'(' => (KeyCode::Kc9, true),
        b')' => (KeyCode::Kc0, true),
        b'\n' => (KeyCode::Enter, false),
        b'\t' => (KeyCode::Tab, false),
        b' ' => (KeyCode::Space, false),
        b'-' => (KeyCode::Minus, false),
        b'_' => (KeyCode::Minus, true),
        b'=' => (KeyCode::Equal, false),
        b'+' => (KeyCode::Equal, true),
        b'[' => (KeyCode::LeftBracket, false),
        b'{' => (KeyCode::LeftBracket, true),
        b']' => (KeyCode::RightBracket, false),
        b'}' => (KeyCode::RightBracket, true),
        b'\\' => (KeyCode::Backslash, false),
        b'|' => (KeyCode::Backslash, true),
        b';' => (KeyCode::Semicolon, false),
        b':' => (KeyCode::Semicolon, true),
        b'\'' => (KeyCode::Quote, false),
        b'"' => (KeyCode::Quote, true),
        b'`' => (KeyCode::Grave, false),
        b'~' => (KeyCode::Grave, true),
        b',' => (KeyCode::Comma, false),
        b'<' => (KeyCode::Comma, true),
        b'.' => (KeyCode::Dot, false),
        b'>' => (KeyCode::Dot, true),
        b'/' => (KeyCode::Slash, false),
        b'?' => (KeyCode::Slash, true),
        _ => (KeyCode::No, false),
    }
}
