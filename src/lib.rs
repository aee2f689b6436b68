//! A ranked ordered index for Rust.
//!
//! This crate provides [`RankList`], a skip-list-backed index over
//! `(key, member)` entries kept in globally descending order with O(log n)
//! insertion, update, removal, rank queries, and contiguous rank-range
//! removal:
//!
//! - [`insert`](RankList::insert) - Insert a member, or reposition it under a new key
//! - [`rank_of`](RankList::rank_of) - 1-based position of a member, best key first
//! - [`get_by_rank`](RankList::get_by_rank) - The entry at a given rank
//! - [`remove_range`](RankList::remove_range) - Drop a contiguous run of ranks
//! - Indexing by [`Rank`] - e.g., `board[Rank(1)]` for the top key
//!
//! # Example
//!
//! ```
//! use rank_list::{Rank, RankList};
//!
//! // Keep only the top 3 scores.
//! let mut board = RankList::with_max_len(3);
//! board.insert(1400, "alice");
//! board.insert(2100, "bob");
//! board.insert(1750, "carol");
//! board.insert(900, "dave"); // refused: it would rank last at capacity
//!
//! assert_eq!(board.len(), 3);
//! assert!(!board.contains(&"dave"));
//!
//! // Higher key, better rank; rank 1 is the top.
//! assert_eq!(board.rank_of(&"bob"), Some(1));
//! assert_eq!(board[Rank(1)], 2100);
//!
//! // Scores can be re-posted; members keep a single entry.
//! board.insert(2400, "carol");
//! assert_eq!(board.rank_of(&"carol"), Some(1));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Unique members** - One entry per member, with O(1) membership and key lookups
//! - **O(log n) rank operations** - Skip-list levels carry span counts, so rank
//!   distance accumulates during every walk
//! - **Bounded mode** - An optional maximum length evicts the lowest-ranked
//!   entries automatically
//!
//! # Implementation
//!
//! Entries live in a skip list ordered by `(key, member)` descending, with
//! key ties broken by member so the order is total. Every forward link
//! records the number of level-0 steps it skips, which makes rank lookup a
//! by-product of ordinary traversal. A hash index from member to node
//! provides O(1) entry points for update and removal. Nodes are stored in
//! an arena and addressed by index, so unlinking can never leave a dangling
//! reference.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod rank_list;

pub use order_statistic::Rank;
pub use rank_list::{RangeError, RankList};
