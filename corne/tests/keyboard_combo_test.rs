pub mod common;

use crate::common::{KC_LSHIFT, create_crkbd_keyboard, run_key_sequence};

mod combo_test {
    use super::*;

    #[test]
    fn test_two_key_combo_fires_after_window() {
        // R+S waits for T, then sends the quote through compose
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 2, true, 10],  // R
                [1, 3, true, 10],  // S
                [1, 2, false, 80],
                [1, 3, false, 10],
            ],
            expected_reports: [
                [0, [kc8!(ScrollLock), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Quote), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_three_key_combo_fires_immediately() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 2, true, 10],  // R
                [1, 3, true, 10],  // S
                [1, 4, true, 10],  // T
                [1, 2, false, 50],
                [1, 3, false, 10],
                [1, 4, false, 10],
            ],
            expected_reports: [
                [0, [kc8!(ScrollLock), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [KC_LSHIFT, [0; 6]],
                [KC_LSHIFT, [kc8!(Quote), 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_combo_order_does_not_matter() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 4, true, 10],  // T
                [5, 4, true, 10],  // N
                [5, 4, false, 30],
                [1, 4, false, 10],
            ],
            expected_reports: [
                [KC_LSHIFT, [kc8!(Minus), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_member_pressed_alone_is_the_key() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 2, true, 10],  // R
                [1, 2, false, 60],
            ],
            expected_reports: [
                [0, [kc8!(R), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_keys_pressed_out_of_window_are_not_a_combo() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 2, true, 10],  // R
                [1, 3, true, 70],  // S, out of R's window
                [1, 3, false, 20],
                [1, 2, false, 20],
            ],
            expected_reports: [
                [0, [kc8!(R), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(S), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_non_member_key_flushes_chord() {
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [1, 2, true, 10],  // R
                [0, 1, true, 10],  // Q
                [0, 1, false, 10],
                [1, 2, false, 10],
            ],
            expected_reports: [
                [0, [kc8!(R), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Q), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_combo_is_alpha_only() {
        // On NUM the same keys are digits
        key_sequence_test! {
            keyboard: create_crkbd_keyboard(),
            sequence: [
                [7, 4, true, 10],   // NUM/Backspace
                [1, 2, true, 190],  // 4
                [1, 3, true, 10],   // 5
                [1, 2, false, 10],
                [1, 3, false, 10],
                [7, 4, false, 10],
            ],
            expected_reports: [
                [0, [kc8!(Kc4), 0, 0, 0, 0, 0]],
                [0, [kc8!(Kc4), kc8!(Kc5), 0, 0, 0, 0]],
                [0, [0, kc8!(Kc5), 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_caps_word_combo() {
        let mut keyboard = create_crkbd_keyboard();
        let sequence = key_sequence![
            [1, 2, true, 10],   // R
            [5, 2, true, 10],   // I
            [1, 2, false, 20],
            [5, 2, false, 10],
            [2, 4, true, 50],   // D
            [2, 4, false, 20],
        ];
        run_key_sequence(&mut keyboard, &sequence);
        assert!(keyboard.is_caps_word_active());
        assert_eq!(
            keyboard.reporter().keyboard,
            key_report![
                [KC_LSHIFT, [kc8!(D), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        );
    }
}
