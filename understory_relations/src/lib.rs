// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_relations --heading-base-level=0

//! Understory Relations: artifact relationship graphs.
//!
//! A design canvas shows a large collection of interlinked artifacts (pages,
//! components, groups). Each artifact declares directional relationships:
//! `next` for sequencing and `children` for nesting. These relationships are
//! discovered by an external indexer and may be cyclic, may repeat a target, or
//! may point at artifacts that are not part of the current view.
//!
//! This crate turns such a flat collection into a normalized [`BaseGraph`] for
//! one [`ViewMode`]:
//!
//! - Items are filtered by a kind predicate specific to the view mode.
//! - `next` and `children` edges are re-derived from the raw edges, dropping
//!   any target that is not part of the filtered set. Cross-view references
//!   are common and are silently ignored.
//! - Malformed edge entries (empty or blank ids) are filtered, not rejected.
//!
//! The graph is an arena: nodes live in a `Vec` in input order and are
//! referenced by stable [`ItemId`], never by pointer. Input order is preserved
//! so that downstream layout is deterministic.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_relations::{Item, ItemKind, ViewMode, build_base_nodes};
//!
//! let items = [
//!     Item::new("home", ItemKind::Frame).with_next(["checkout"]),
//!     Item::new("checkout", ItemKind::Frame).with_next(["button"]),
//!     Item::new("button", ItemKind::Component),
//! ];
//!
//! let pages = build_base_nodes(&items, ViewMode::Pages);
//! assert_eq!(pages.len(), 2);
//! // `button` is a component, so the edge leaving the page view is dropped.
//! assert!(pages.get("checkout").unwrap().next.is_empty());
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`Item`], [`ItemKind`],
//!   [`ItemId`] and [`ViewMode`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod base;
mod id;
mod item;
mod view_mode;

pub use base::{BaseGraph, BaseNode, build_base_nodes};
pub use id::ItemId;
pub use item::{Item, ItemKind, ParseKindError};
pub use view_mode::ViewMode;
