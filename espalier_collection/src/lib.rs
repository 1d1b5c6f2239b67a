// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_collection --heading-base-level=0

//! Espalier Collection: ordered child collections with deferred mutation.
//!
//! A scene graph that dispatches events while it is being traversed has a
//! classic reentrancy problem: an event handler may add or remove children of
//! the very sequence the caller is iterating. [`Collection`] solves this with
//! an iteration lock. While a collection is locked, additions are buffered and
//! removals only flag the entry; the live sequence a traversal observes never
//! changes under it. Once the traversal ends, [`Collection::cleanup`] commits
//! the buffered operations in call order.
//!
//! Collections are ordered and duplicate-free. Every committed structural
//! change is recorded as a [`Change`] in a journal that the owner drains once
//! per pass, so derived state (paint order, layout caches, selection models)
//! can be rebuilt without the collection knowing who depends on it.
//!
//! ## Usage
//!
//! ```rust
//! use espalier_collection::{Change, Collection};
//!
//! let mut children: Collection<u32> = Collection::new();
//! assert!(children.add(1));
//! assert!(children.add(2));
//!
//! // A traversal begins: structural changes are deferred from here on.
//! children.lock();
//! assert!(children.add(3));
//! assert!(children.remove(1));
//! assert_eq!(children.as_slice(), &[1, 2]); // unchanged while locked
//!
//! children.unlock();
//! assert!(children.cleanup());
//! assert_eq!(children.as_slice(), &[2, 3]);
//! ```
//!
//! Ownership rules (a key may live in at most one collection) are not
//! enforced here; they belong to the tree that owns the collections and can
//! see all of them at once.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;

pub use collection::{Change, Collection};
