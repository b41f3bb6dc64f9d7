//! The split 3x6+3 layout of the crkbd.
//!
//! Layers are written in reading order: three rows of twelve keys (left half then
//! right half), followed by the six thumb keys. The matrix has four rows per half,
//! the right half is mirrored and lives on rows 4..8.
//!
//! ```text
//! matrix row 0..3: L00 L01 L02 L03 L04 L05      matrix row 4..7: R05 R04 R03 R02 R01 R00
//! matrix row 3:    --  --  --  L30 L31 L32      matrix row 7:    --  --  --  R32 R31 R30
//! ```

use crate::action::KeyAction;
use crate::event::KeyPos;

/// Matrix rows, both halves
pub const ROW: usize = 8;
/// Matrix columns
pub const COL: usize = 6;
/// Keys in one layer, in reading order
pub const KEY_COUNT: usize = 42;

/// Matrix position of a key given in the logical 4x12 grid.
///
/// `row` 0..3 are the finger rows with `col` 0..12, `row` 3 is the thumb row whose keys
/// sit at `col` 3..9 (left thumbs 3..6, right thumbs 6..9).
pub const fn split_3x6_3_pos(row: u8, col: u8) -> KeyPos {
    if col < 6 {
        KeyPos::new(row, col)
    } else {
        KeyPos::new(row + 4, 11 - col)
    }
}

/// Build a matrix layer from 42 keys in reading order. Matrix positions without a key are `No`.
pub const fn split_3x6_3(keys: [KeyAction; KEY_COUNT]) -> [[KeyAction; COL]; ROW] {
    let mut layer = [[KeyAction::No; COL]; ROW];
    let mut i = 0;
    while i < KEY_COUNT {
        let (row, col) = if i < 36 {
            ((i / 12) as u8, (i % 12) as u8)
        } else {
            (3, (3 + i - 36) as u8)
        };
        let pos = split_3x6_3_pos(row, col);
        layer[pos.row as usize][pos.col as usize] = keys[i];
        i += 1;
    }
    layer
}
