// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope Selection: the set of selected tiles.
//!
//! A [`Selection`] is an ordered set of keys, usually tile coordinates.
//! Clicks map to a [`SelectMode`] through [`SelectMode::for_click`];
//! rectangle gestures use the batch calls.
//!
//! ```rust
//! use tilescope_selection::{SelectMode, Selection};
//!
//! let mut selection = Selection::<u32>::new();
//! selection.select(10, SelectMode::Replace);
//! selection.select(11, SelectMode::Toggle);
//! assert_eq!(selection.items(), &[10, 11]);
//!
//! selection.select(11, SelectMode::Remove);
//! selection.select(10, SelectMode::Remove);
//! assert!(selection.is_empty());
//! ```
//!
//! Copy commands turn the keys into tile IDs and format them with
//! [`format_sorted`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Display, Write as _};

/// How a single key is applied to a [`Selection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Clear the selection and select only the key.
    #[default]
    Replace,
    /// Add the key, keeping the rest of the selection.
    Add,
    /// Remove the key if it is selected.
    Remove,
    /// Add the key if absent, remove it if present.
    Toggle,
}

impl SelectMode {
    /// Mode for a click: Shift or Ctrl toggles, a plain click replaces.
    #[must_use]
    pub fn for_click(shift: bool, ctrl: bool) -> Self {
        if shift || ctrl {
            Self::Toggle
        } else {
            Self::Replace
        }
    }
}

/// Selected keys in the order they were selected, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Selected keys in selection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates the selected keys.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keeps only the keys for which `keep` returns `true`.
    ///
    /// Used when a new tileset no longer has some of the selected tiles.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.items.contains(key)
    }

    /// Applies one key according to `mode`.
    pub fn select(&mut self, key: T, mode: SelectMode) {
        match mode {
            SelectMode::Replace => self.select_only(key),
            SelectMode::Add => self.add(key),
            SelectMode::Remove => self.remove(&key),
            SelectMode::Toggle => self.toggle(key),
        }
    }

    /// Makes `key` the only selected key.
    pub fn select_only(&mut self, key: T) {
        self.items.clear();
        self.items.push(key);
    }

    /// Adds `key` unless it is already selected.
    pub fn add(&mut self, key: T) {
        if !self.contains(&key) {
            self.items.push(key);
        }
    }

    /// Deselects `key` if it is selected.
    pub fn remove(&mut self, key: &T) {
        self.items.retain(|k| k != key);
    }

    /// Deselects `key` if it is selected, otherwise adds it.
    pub fn toggle(&mut self, key: T) {
        if self.contains(&key) {
            self.remove(&key);
        } else {
            self.items.push(key);
        }
    }

    /// Replaces the selection with `keys`, dropping repeats.
    pub fn replace_with(&mut self, keys: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.extend_with(keys);
    }

    /// Adds every key of `keys` that is not selected yet.
    pub fn extend_with(&mut self, keys: impl IntoIterator<Item = T>) {
        for key in keys {
            self.add(key);
        }
    }

    /// Deselects every key of `keys`.
    pub fn remove_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        for key in keys {
            self.remove(key);
        }
    }
}

/// Sorts and de-duplicates `values`, then joins them with `", "`.
///
/// This is the clipboard format for copied tile IDs.
#[must_use]
pub fn format_sorted<K, I>(values: I) -> String
where
    I: IntoIterator<Item = K>,
    K: Ord + Display,
{
    let mut values: Vec<K> = values.into_iter().collect();
    values.sort_unstable();
    values.dedup();
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{SelectMode, Selection, format_sorted};

    #[test]
    fn click_modes_follow_modifiers() {
        assert_eq!(SelectMode::for_click(false, false), SelectMode::Replace);
        assert_eq!(SelectMode::for_click(true, false), SelectMode::Toggle);
        assert_eq!(SelectMode::for_click(false, true), SelectMode::Toggle);
    }

    #[test]
    fn format_sorts_numerically() {
        assert_eq!(format_sorted([512_u32, 3, 40, 3]), "3, 40, 512");
        assert_eq!(format_sorted(Vec::<u32>::new()), "");
    }

    #[test]
    fn retain_keeps_order() {
        let mut sel = Selection::new();
        sel.replace_with([1, 2, 3, 4]);
        sel.retain(|k| k % 2 == 0);
        assert_eq!(sel.items(), &[2, 4]);
    }
}
