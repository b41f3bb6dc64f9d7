use embassy_time::Instant;

/// A key state change reported by the matrix scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    /// When the scanner observed the change
    pub time: Instant,
}

impl KeyEvent {
    pub fn new(row: u8, col: u8, pressed: bool, time: Instant) -> Self {
        Self { row, col, pressed, time }
    }

    pub fn pos(&self) -> KeyPos {
        KeyPos {
            row: self.row,
            col: self.col,
        }
    }
}

/// A physical key position in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}
