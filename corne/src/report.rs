//! HID reports produced by the keyboard and the trait the transport implements.

use usbd_hid::descriptor::{MediaKeyboardReport, MouseReport};

/// Boot protocol keyboard report: modifier byte and 6 keycodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8, // HidModifiers
    pub reserved: u8,
    pub leds: u8,
    pub keycodes: [u8; 6],
}

impl From<KeyboardReport> for usbd_hid::descriptor::KeyboardReport {
    fn from(report: KeyboardReport) -> Self {
        Self {
            modifier: report.modifier,
            reserved: report.reserved,
            leds: report.leds,
            keycodes: report.keycodes,
        }
    }
}

pub enum Report {
    /// Normal keyboard hid report
    KeyboardReport(KeyboardReport),
    /// Mouse hid report
    MouseReport(MouseReport),
    /// Media keyboard report
    MediaKeyboardReport(MediaKeyboardReport),
}

/// HidReporter is implemented by whatever ships reports to the host, usually the USB HID stack.
pub trait HidReporter {
    /// Queue a report. Must not block.
    fn send_report(&mut self, report: Report);
}
