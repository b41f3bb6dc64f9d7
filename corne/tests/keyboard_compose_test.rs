pub mod common;

use corne::compose::ComposeError;

use crate::common::{KC_LSHIFT, create_test_keyboard, run_key_sequence};

mod compose_test {
    use super::*;

    #[test]
    fn test_compose_sequence() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [0, 1, true, 10],  // é
                [0, 1, false, 20],
            ],
            expected_reports: [
                [0, [kc8!(ScrollLock), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Quote), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_compose_ignores_held_shift() {
        // Shift is restored once the sequence is sent
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [0, 0, true, 10],  // LShift
                [0, 1, true, 10],  // é
                [0, 1, false, 10],
                [0, 0, false, 10],
            ],
            expected_reports: [
                [KC_LSHIFT, [0; 6]],
                [0, [kc8!(ScrollLock), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Quote), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [KC_LSHIFT, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_compose_with_six_held_keys() {
        let mut keyboard = create_test_keyboard();
        let sequence = key_sequence![
            [2, 1, true, 10],  // B
            [2, 2, true, 10],  // C
            [2, 3, true, 10],  // D
            [2, 4, true, 10],  // F
            [2, 5, true, 10],  // G
            [0, 5, true, 10],  // A
            [0, 1, true, 10],  // é
            [0, 1, false, 10],
        ];
        run_key_sequence(&mut keyboard, &sequence);

        let held = [kc8!(B), kc8!(C), kc8!(D), kc8!(F), kc8!(G), kc8!(A)];
        let reports = &keyboard.reporter().keyboard;
        assert_eq!(reports.len(), 13);
        assert_eq!(reports[5], key_report![[0, held]][0]);
        // The whole sequence is sent, then the held keys come back
        assert_eq!(
            reports[6..],
            key_report![
                [0, [kc8!(ScrollLock), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Quote), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, held],
            ][..]
        );
    }

    #[test]
    fn test_compose_tap_hold_tapped() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [0, 2, true, 10],  // é, shift on hold
                [0, 2, false, 50],
            ],
            expected_reports: [
                [0, [kc8!(ScrollLock), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(Quote), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_compose_tap_hold_held() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [0, 2, true, 10],
                [0, 2, false, 300],
            ],
            expected_reports: [
                [KC_LSHIFT, [0; 6]],
                [0, [0; 6]],
            ]
        };
    }

    #[test]
    fn test_upper_case_text() {
        let mut keyboard = create_test_keyboard();
        assert_eq!(keyboard.dispatch_compose(1), Ok(()));
        assert_eq!(
            keyboard.reporter().keyboard,
            key_report![
                [KC_LSHIFT, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0; 6]],
            ]
        );
    }

    #[test]
    fn test_unknown_compose_sends_nothing() {
        let mut keyboard = create_test_keyboard();
        // Compose action 9 isn't defined
        let sequence = key_sequence![
            [0, 3, true, 10],
            [0, 3, false, 20],
        ];
        run_key_sequence(&mut keyboard, &sequence);
        assert!(keyboard.reporter().keyboard.is_empty());
        assert_eq!(keyboard.dispatch_compose(9), Err(ComposeError::UnknownAction(9)));
    }
}
