pub mod common;

use crate::common::{KC_LCTRL, KC_LGUI, KC_LSHIFT, create_crkbd_keyboard, create_test_keyboard};

mod tap_hold_test {
    use super::*;

    #[test]
    fn test_mod_tap_tapped() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],  // GUI/A
                [1, 1, false, 100],
            ],
            expected_reports: [
                [0, [kc8!(A), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_mod_tap_held() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],
                [1, 1, false, 300],
            ],
            expected_reports: [
                [KC_LGUI, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_key_pressed_in_tapping_term_is_replayed_after_tap() {
        // Released before the term: both keys come out in order, unmodified
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],  // GUI/A
                [0, 1, true, 40],  // Q
                [0, 1, false, 30],
                [1, 1, false, 40],
            ],
            expected_reports: [
                [0, [kc8!(A), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Q), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_key_pressed_in_tapping_term_is_modified_after_hold() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],   // GUI/A
                [0, 1, true, 40],   // Q
                [0, 1, false, 150],
                [1, 1, false, 50],
            ],
            expected_reports: [
                [KC_LGUI, [0; 6]],
                [KC_LGUI, [kc8!(Q), 0, 0, 0, 0, 0]],
                [KC_LGUI, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_rolling_mod_taps() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 1, true, 10],  // GUI/A
                [5, 1, true, 20],  // GUI/O
                [1, 1, false, 30],
                [5, 1, false, 30],
            ],
            expected_reports: [
                [0, [kc8!(A), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(O), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_shift_mod_tap_has_shorter_term() {
        // 140ms is past the 130ms of SHIFT/T
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 4, true, 10],  // SHIFT/T
                [1, 4, false, 140],
            ],
            expected_reports: [
                [KC_LSHIFT, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_ctrl_mod_tap_has_default_term() {
        // but not past the 150ms of CTRL/S
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 3, true, 10],  // CTRL/S
                [1, 3, false, 140],
            ],
            expected_reports: [
                [0, [kc8!(S), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_ctrl_mod_tap_held() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 3, true, 10],
                [1, 3, false, 200],
            ],
            expected_reports: [
                [KC_LCTRL, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_held_modifier_and_key_in_same_report() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [0, 0, true, 10],  // LShift
                [0, 5, true, 10],  // A
                [0, 5, false, 10],
                [0, 0, false, 10],
            ],
            expected_reports: [
                [KC_LSHIFT, [0; 6]],
                [KC_LSHIFT, [kc8!(A), 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }
}
