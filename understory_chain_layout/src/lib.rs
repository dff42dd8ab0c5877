// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_chain_layout --heading-base-level=0

//! Understory Chain Layout: deterministic placement of cyclic artifact graphs.
//!
//! Given a [`BaseGraph`](understory_relations::BaseGraph) and a size per
//! artifact, [`compute_layout`] arranges the artifacts on an infinite canvas:
//!
//! - `next` sequences become rows, read left to right.
//! - `children` are stacked beneath their parent.
//! - Isolated artifacts fill a wrapping grid below the rows.
//!
//! Relationship graphs coming from an indexer are not trees. An artifact may
//! be reachable from several others (fan-in), and both `next` and `children`
//! edges may form cycles. Instead of rejecting such input, the layout keeps a
//! globally visited set and a DFS path set: each artifact is placed exactly
//! once, and every repeat visit becomes a [`Teleport`], a small chip that
//! points at the canonical placement. This bounds recursion by the depth of
//! the graph and guarantees termination.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_chain_layout::{CollapseState, LayoutOptions, compute_layout};
//! use understory_relations::{Item, ItemKind, ViewMode, build_base_nodes};
//!
//! let items = [
//!     Item::new("a", ItemKind::Frame).with_next(["b"]),
//!     Item::new("b", ItemKind::Frame),
//!     Item::new("c", ItemKind::Frame).with_next(["b"]),
//! ];
//! let graph = build_base_nodes(&items, ViewMode::Pages);
//! let options = LayoutOptions::default();
//!
//! let positions = compute_layout(
//!     &graph,
//!     |_, _| Size::new(200.0, 120.0),
//!     &options,
//!     &CollapseState::new(),
//! );
//!
//! assert_eq!(positions.frame("a").unwrap().origin(), Point::ZERO);
//! // `b` is placed once, in the first chain; the second chain gets a teleport.
//! assert_eq!(positions.teleports_to("b").count(), 1);
//! ```
//!
//! ## Output
//!
//! [`LayoutPositions`] is a snapshot holding canonical frames, teleports,
//! group bounds and ids hidden beneath collapsed nodes. Manual placement is
//! layered on top with [`PositionOverrides`], which always win over computed
//! positions and never modify the snapshot.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collapse;
mod density;
mod engine;
mod options;
mod positions;

pub use collapse::CollapseState;
pub use density::Density;
pub use engine::compute_layout;
pub use options::LayoutOptions;
pub use positions::{LayoutPositions, Placement, PositionOverrides, Teleport};
