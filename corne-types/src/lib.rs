//! # Corne Types
//!
//! Plain data shared by the corne keymap engine and its keymaps.
//!
//! - [`keycode`] - HID keyboard usage ids, plus the consumer usages used by media keys
//! - [`modifier`] - Modifier combinations and the HID modifier byte
//! - [`action`] - Key actions stored in layer tables

#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod keycode;
pub mod modifier;
