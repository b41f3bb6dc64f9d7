use embassy_time::Instant;
use usbd_hid::descriptor::MouseReport;

use crate::config::MouseConfig;
use crate::event::KeyEvent;
use crate::keyboard::Keyboard;
use crate::keycode::KeyCode;
use crate::report::{HidReporter, Report};

/// Mouse keys state: pressed buttons, held direction keys and acceleration.
pub(crate) struct MouseState {
    report: MouseReport,
    /// Held direction keys, one bit per direction in keycode order
    held_directions: u8,
    /// Number of movement reports since the movement started
    repeat: u8,
    /// When the next movement report is due
    next_repeat: Option<Instant>,
}

impl MouseState {
    pub(crate) fn new() -> Self {
        MouseState {
            report: MouseReport {
                buttons: 0,
                x: 0,
                y: 0,
                wheel: 0,
                pan: 0,
            },
            held_directions: 0,
            repeat: 0,
            next_repeat: None,
        }
    }

    pub(crate) fn next_repeat(&self) -> Option<Instant> {
        self.next_repeat
    }

    fn direction_bit(key: KeyCode) -> Option<u8> {
        match key {
            KeyCode::MouseUp => Some(0),
            KeyCode::MouseDown => Some(1),
            KeyCode::MouseLeft => Some(2),
            KeyCode::MouseRight => Some(3),
            KeyCode::MouseWheelUp => Some(4),
            KeyCode::MouseWheelDown => Some(5),
            KeyCode::MouseWheelLeft => Some(6),
            KeyCode::MouseWheelRight => Some(7),
            _ => None,
        }
    }

    fn button_bit(key: KeyCode) -> Option<u8> {
        match key {
            KeyCode::MouseBtn1 => Some(0),
            KeyCode::MouseBtn2 => Some(1),
            KeyCode::MouseBtn3 => Some(2),
            _ => None,
        }
    }

    fn is_held(&self, bit: u8) -> bool {
        self.held_directions & (1 << bit) != 0
    }

    /// Update the held keys. Returns true when the key moves the cursor or the wheel.
    pub(crate) fn process(&mut self, key: KeyCode, pressed: bool) -> bool {
        if let Some(bit) = Self::button_bit(key) {
            if pressed {
                self.report.buttons |= 1 << bit;
            } else {
                self.report.buttons &= !(1 << bit);
            }
            return false;
        }
        let Some(bit) = Self::direction_bit(key) else {
            return false;
        };
        if pressed {
            // Acceleration restarts when the cursor starts moving
            if self.held_directions & 0x0F == 0 && bit < 4 {
                self.repeat = 0;
            }
            self.held_directions |= 1 << bit;
        } else {
            self.held_directions &= !(1 << bit);
        }
        true
    }

    /// Cursor step of the current movement report
    fn move_unit(&self, config: &MouseConfig) -> i8 {
        let delta = config.move_delta as u16;
        let unit = if self.repeat == 0 {
            delta
        } else if self.repeat >= config.time_to_max {
            delta * config.max_speed as u16
        } else {
            delta * config.max_speed as u16 * self.repeat as u16 / config.time_to_max as u16
        };
        unit.clamp(1, i8::MAX as u16) as i8
    }

    fn axis(&self, negative: u8, positive: u8, unit: i8) -> i8 {
        match (self.is_held(negative), self.is_held(positive)) {
            (true, false) => -unit,
            (false, true) => unit,
            _ => 0,
        }
    }

    /// Compute the next report from the held keys
    pub(crate) fn next_report(&mut self, config: &MouseConfig) -> MouseReport {
        let unit = self.move_unit(config);
        let wheel = config.wheel_delta.min(i8::MAX as u8) as i8;
        self.report.x = self.axis(2, 3, unit);
        self.report.y = self.axis(0, 1, unit);
        self.report.wheel = self.axis(5, 4, wheel);
        self.report.pan = self.axis(6, 7, wheel);
        if self.report.x != 0 || self.report.y != 0 {
            self.repeat = self.repeat.saturating_add(1);
        }
        self.report
    }

    /// Release of a button or a direction key doesn't need a movement
    pub(crate) fn stopped_report(&mut self) -> MouseReport {
        self.report.x = 0;
        self.report.y = 0;
        self.report.wheel = 0;
        self.report.pan = 0;
        self.report
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.held_directions != 0
    }
}

impl<'a, R: HidReporter, const ROW: usize, const COL: usize, const NUM_LAYER: usize> Keyboard<'a, R, ROW, COL, NUM_LAYER> {
    pub(crate) fn process_action_mouse(&mut self, key: KeyCode, key_event: KeyEvent) {
        let config = self.behavior.mouse;
        let was_moving = self.mouse.is_moving();
        let is_direction = self.mouse.process(key, key_event.pressed);

        let report = if is_direction && key_event.pressed {
            self.mouse.next_report(&config)
        } else {
            self.mouse.stopped_report()
        };
        self.send_report(Report::MouseReport(report));

        if !self.mouse.is_moving() {
            self.mouse.next_repeat = None;
        } else if !was_moving {
            self.mouse.next_repeat = Some(key_event.time + config.delay + config.interval);
        }
    }

    /// Send a movement report when the repeat is due
    pub(crate) fn repeat_mouse(&mut self, now: Instant) {
        let Some(next) = self.mouse.next_repeat else {
            return;
        };
        if now < next {
            return;
        }
        let config = self.behavior.mouse;
        let report = self.mouse.next_report(&config);
        self.send_report(Report::MouseReport(report));
        self.mouse.next_repeat = Some(now + config.interval);
    }
}
