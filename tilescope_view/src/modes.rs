// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

/// How pan and zoom are held against the image bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// No clamping; the image may leave the view entirely.
    None,
    /// Some part of the image always stays in view.
    KeepSomeVisible,
    /// Per axis: center the world bounds when they are smaller than the view,
    /// otherwise keep them covering the whole view so no gap shows at an edge.
    #[default]
    CenterOrEdge,
}
