// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope Input: toolkit-neutral input events and the state built on them.
//!
//! The embedding toolkit translates its native events into [`InputEvent`]s.
//! This crate then provides the small amount of state a viewer needs to
//! interpret them:
//!
//! - [`drag`]: pointer drag tracking with per-move deltas, used for panning.
//! - [`KeyBindings`]: maps a key plus [`Modifiers`] to a viewer [`Command`].
//! - [`clamp_window_size`]: enforces the minimum window size on resize.
//!
//! ## Minimal example
//!
//! ```rust
//! use tilescope_input::{Command, Key, KeyBindings, Modifiers};
//!
//! let bindings = KeyBindings::default();
//! assert_eq!(bindings.command_for(Key::Char('g'), Modifiers::empty()), Some(Command::ToggleGrid));
//! assert_eq!(bindings.command_for(Key::Char('c'), Modifiers::CTRL), Some(Command::CopyIds));
//! // Plain `c` is not bound.
//! assert_eq!(bindings.command_for(Key::Char('c'), Modifiers::empty()), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod drag;

mod bindings;
mod event;

pub use bindings::{Command, KeyBindings};
pub use event::{
    InputEvent, Key, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, Modifiers, PointerButton,
    clamp_window_size,
};
