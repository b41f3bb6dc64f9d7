pub mod test_macro;

use corne::action::KeyAction;
use corne::compose::{ComposeAction, ComposeStep};
use corne::config::BehaviorConfig;
use corne::event::KeyEvent;
use corne::keyboard::Keyboard;
use corne::report::{HidReporter, KeyboardReport, Report};
use corne::{caps_word, cp, cpt, k};
use embassy_time::{Duration, Instant};
use log::debug;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const KC_LCTRL: u8 = 1 << 0;
pub const KC_LSHIFT: u8 = 1 << 1;
pub const KC_LGUI: u8 = 1 << 3;

/// Time given to pending timers after the last event of a sequence
pub const SETTLE: Duration = Duration::from_millis(500);

/// Collects every report the keyboard sends
#[derive(Default)]
pub struct TestReporter {
    pub keyboard: Vec<KeyboardReport>,
    /// Consumer usage ids
    pub media: Vec<u16>,
    /// (buttons, x, y, wheel, pan)
    pub mouse: Vec<(u8, i8, i8, i8, i8)>,
}

impl HidReporter for TestReporter {
    fn send_report(&mut self, report: Report) {
        match report {
            Report::KeyboardReport(r) => self.keyboard.push(r),
            Report::MediaKeyboardReport(r) => self.media.push(r.usage_id),
            Report::MouseReport(r) => self.mouse.push((r.buttons, r.x, r.y, r.wheel, r.pan)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestKeyPress {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    /// Milliseconds since the previous event
    pub delay: u64,
}

/// Feed a key sequence to the keyboard, then let the pending timers run out.
///
/// Returns the time of the last event.
pub fn run_key_sequence<const ROW: usize, const COL: usize, const NUM_LAYER: usize>(
    keyboard: &mut Keyboard<'_, TestReporter, ROW, COL, NUM_LAYER>,
    key_sequence: &[TestKeyPress],
) -> Instant {
    let mut now = Instant::from_millis(0);
    for key in key_sequence {
        now += Duration::from_millis(key.delay);
        debug!("Key event at {}ms: {:?}", now.as_millis(), key);
        keyboard.process_event(KeyEvent::new(key.row, key.col, key.pressed, now));
    }
    keyboard.tick(now + SETTLE);
    now
}

pub fn run_key_sequence_test<const ROW: usize, const COL: usize, const NUM_LAYER: usize>(
    mut keyboard: Keyboard<'_, TestReporter, ROW, COL, NUM_LAYER>,
    key_sequence: &[TestKeyPress],
    expected_reports: &[KeyboardReport],
) {
    run_key_sequence(&mut keyboard, key_sequence);
    let reports = &keyboard.reporter().keyboard;
    for (i, (report, expected)) in reports.iter().zip(expected_reports.iter()).enumerate() {
        assert_eq!(report, expected, "on {}th report", i);
    }
    assert_eq!(reports.len(), expected_reports.len(), "got reports: {:?}", reports);
}

pub static TEST_COMPOSE_ACTIONS: [ComposeAction; 2] = [
    ComposeAction::new(
        "e_acute",
        &[
            ComposeStep::Tap(corne::compose::COMPOSE_KEY),
            ComposeStep::Tap(corne::keycode::KeyCode::Quote),
            ComposeStep::Text("e"),
        ],
    ),
    ComposeAction::new("caps_e", &[ComposeStep::Text("E")]),
];

/// 3x6 single layer keymap with one key of every kind, and a row of letters
#[rustfmt::skip]
pub static TEST_KEYMAP: [[[KeyAction; 6]; 3]; 1] = [[
    [k!(LShift), cp!(0),  cpt!(0, corne::modifier::SHIFT), cp!(9),         caps_word!(),    k!(A)],
    [k!(Minus),  k!(Kc1), k!(Space),                       k!(Backspace),  k!(MouseRight),  k!(AudioVolUp)],
    [k!(LCtrl),  k!(B),   k!(C),                           k!(D),          k!(F),           k!(G)],
]];

pub fn create_test_keyboard() -> Keyboard<'static, TestReporter, 3, 6, 1> {
    Keyboard::new(
        &TEST_KEYMAP,
        &TEST_COMPOSE_ACTIONS,
        BehaviorConfig::default(),
        TestReporter::default(),
    )
}

pub fn create_crkbd_keyboard() -> Keyboard<'static, TestReporter, 8, 6, 10> {
    corne::keymaps::crkbd::keyboard(TestReporter::default())
}

pub fn create_accent_keyboard() -> Keyboard<'static, TestReporter, 8, 6, 6> {
    corne::keymaps::accent::keyboard(TestReporter::default())
}
