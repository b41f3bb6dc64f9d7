pub mod common;

use corne::event::KeyEvent;
use embassy_time::Instant;

use crate::common::{create_crkbd_keyboard, create_test_keyboard, run_key_sequence};

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

mod media_test {
    use super::*;

    #[test]
    fn test_volume_up_on_consumer_page() {
        let mut keyboard = create_test_keyboard();
        let sequence = key_sequence![
            [1, 5, true, 10],  // AudioVolUp
            [1, 5, false, 30],
        ];
        run_key_sequence(&mut keyboard, &sequence);
        assert_eq!(keyboard.reporter().media, vec![0xE9, 0]);
        assert!(keyboard.reporter().keyboard.is_empty());
    }

    #[test]
    fn test_media_layer_play_pause() {
        let mut keyboard = create_crkbd_keyboard();
        let sequence = key_sequence![
            [3, 3, true, 10],   // MEDIA/Escape
            [7, 4, true, 190],  // Play/Pause
            [7, 4, false, 20],
            [3, 3, false, 20],
        ];
        run_key_sequence(&mut keyboard, &sequence);
        assert_eq!(keyboard.reporter().media, vec![0xCD, 0]);
        assert!(keyboard.reporter().keyboard.is_empty());
    }
}

mod mouse_test {
    use super::*;

    #[test]
    fn test_mouse_move_repeats_while_held() {
        let mut keyboard = create_test_keyboard();
        keyboard.process_event(KeyEvent::new(1, 4, true, at(10)));
        assert_eq!(keyboard.next_deadline(), Some(at(18)));

        keyboard.tick(at(18));
        keyboard.tick(at(20));
        keyboard.tick(at(26));
        keyboard.process_event(KeyEvent::new(1, 4, false, at(30)));
        assert_eq!(keyboard.next_deadline(), None);

        // First step, two accelerated repeats, then the stop
        assert_eq!(
            keyboard.reporter().mouse,
            vec![(0, 8, 0, 0, 0), (0, 1, 0, 0, 0), (0, 2, 0, 0, 0), (0, 0, 0, 0, 0)]
        );
    }

    #[test]
    fn test_mouse_button_click() {
        let mut keyboard = create_crkbd_keyboard();
        let sequence = key_sequence![
            [3, 5, true, 10],   // MOUSE/Tab
            [7, 5, true, 190],  // Button 1
            [7, 5, false, 20],
            [3, 5, false, 20],
        ];
        run_key_sequence(&mut keyboard, &sequence);
        assert_eq!(keyboard.reporter().mouse, vec![(1, 0, 0, 0, 0), (0, 0, 0, 0, 0)]);
    }
}
