//! # Corne
//!
//! Keymap engine for a split 3x6+3 keyboard: layered keymap with tap-hold and one shot
//! keys, key chords, compose actions for accented chars and an OLED layer status line.
//!
//! Key events go in through [`keyboard::Keyboard::process_event`] or
//! [`keyboard::Keyboard::scan`], HID reports come out through a [`report::HidReporter`].

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
pub(crate) mod fmt;

pub use corne_types::{action, keycode, modifier};

pub mod combo;
pub mod compose;
pub mod config;
pub mod display;
pub mod event;
pub mod keyboard;
pub mod keymap;
pub mod keymaps;
pub mod layer_state;
pub mod layout;
pub mod layout_macro;
pub mod report;
