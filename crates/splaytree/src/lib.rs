//! # splaytree
//!
//! Self-adjusting binary search tree for the cache study.
//!
//! ## Architecture
//! - **Arena**: nodes live in a `Vec`, linked by `NodeId` indices
//! - **Parent links**: non-owning indices, so rotations never fight the borrow checker
//! - **Splaying**: every successful `find` rotates the hit to the root
//!
//! Inserts descend like a plain BST and do not rebalance. Equal keys are
//! routed into the right subtree.

#![warn(missing_docs)]

mod iter;
mod tree;

pub use iter::Iter;
pub use tree::SplayTree;
