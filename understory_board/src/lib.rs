// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_board --heading-base-level=0

//! Understory Board: an infinite canvas of related artifacts.
//!
//! [`Board`] wires the component crates into one data flow:
//!
//! 1. The artifact collection is filtered by [`ViewMode`] into a
//!    [`BaseGraph`] ([`understory_relations`]).
//! 2. The graph, density-scaled sizes and collapse state are laid out into
//!    [`LayoutPositions`] ([`understory_chain_layout`]).
//! 3. A [`CanvasView`] culls the layout against the visible canvas rectangle
//!    and picks a render tier ([`understory_canvas_view`]).
//!
//! Inputs only mark the board dirty; the layout is rebuilt on
//! [`Board::commit`], which every query calls first.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_board::Board;
//! use understory_relations::{Item, ItemKind};
//!
//! let mut board = Board::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
//! board.set_items([
//!     Item::new("home", ItemKind::Frame).with_next(["checkout"]),
//!     Item::new("checkout", ItemKind::Frame).with_next(["home"]),
//! ]);
//!
//! // The cycle back to `home` is drawn as a teleport chip.
//! let keys: Vec<_> = board.positions().teleports().map(|tp| tp.key.clone()).collect();
//! assert_eq!(keys, ["tp:home:0"]);
//!
//! // Jumping through the chip centers the canonical frame.
//! let pending = board.focus_teleport("tp:home:0");
//! assert!(pending.is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod board;

pub use board::{Board, DEFAULT_NATURAL_SIZE, VisibleItem};

pub use understory_canvas_view::{
    CanvasView, FocusOptions, PendingSettle, RenderTier, SettleOutcome, Transform,
};
pub use understory_chain_layout::{
    CollapseState, Density, LayoutOptions, LayoutPositions, Placement, PositionOverrides,
    Teleport,
};
pub use understory_relations::{BaseGraph, Item, ItemId, ItemKind, ViewMode};
