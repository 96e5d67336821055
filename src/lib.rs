//! # vsort
//!
//! `vsort` is a vectorized hybrid quicksort for in-place sorting, partial
//! sorting, and selection over arrays of primitive numeric types. It
//! targets SIMD hardware with 8, 16, or 32 lanes per register and combines
//! a streaming mask-compress-store partitioning kernel with a bitonic
//! sorting network for small ranges, falling back to heapsort under an
//! introspective recursion-depth bound so worst-case behavior never
//! degrades below O(n log n).
//!
//! ## Key Features
//!
//! - **Vectorized partitioning**: the core partition step streams
//!   lane-vectors in from both ends of the working range and
//!   mask-compress-stores them to the correct side in one pass, rather
//!   than the scalar swap-based partitioning classic quicksort uses.
//! - **Introspective depth bound**: recursion is capped at
//!   `⌊2·log2(n)⌋`, past which the driver falls back to heapsort,
//!   guaranteeing O(n log n) worst case regardless of pivot quality.
//! - **Duplicate-run pruning**: when a sampled pivot turns out to equal
//!   the range's minimum or maximum, the driver skips the run of
//!   pivot-equal elements instead of repeatedly reselecting the same
//!   pivot against it.
//! - **NaN-aware**: float element types treat NaN as sorting to the end
//!   ([`sort`], [`partial_sort`]) or excluded from the ordered range
//!   ([`select`]), never compared against finite values.
//! - **Portable reference backend**: the SIMD seam ([`vector::Lanes`])
//!   is implemented in scalar Rust over a fixed-size lane array, so the
//!   crate builds and runs correctly anywhere, with the exact method
//!   surface a target-feature-gated intrinsics backend would implement
//!   in its place.
//!
//! ## Usage
//!
//! ```rust
//! use vsort::sort;
//!
//! let mut data = vec![5i32, 3, 8, 1, 9, 2];
//! sort(&mut data);
//! assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
//! ```
//!
//! ```rust
//! use vsort::select;
//!
//! let mut data = vec![5i32, 3, 8, 1, 9, 2];
//! select(&mut data, 2, false);
//! assert_eq!(data[2], 3);
//! assert!(data[..2].iter().all(|&x| x <= data[2]));
//! assert!(data[2..].iter().all(|&x| x >= data[2]));
//! ```
//!
//! ```rust
//! use vsort::partial_sort;
//!
//! let mut data = vec![5i32, 3, 8, 1, 9, 2];
//! partial_sort(&mut data, 3, false);
//! assert_eq!(&data[..3], &[1, 2, 3]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Best/average case**: O(n log n) with a small constant factor from
//!   vectorized partitioning and a branch-free small-range network sort.
//! - **Worst case**: O(n log n), guaranteed by the introspective heapsort
//!   fallback regardless of adversarial input.
//! - **Memory overhead**: in-place; the only extra storage is the fixed
//!   small pivot-sample and lane-register buffers.

pub mod driver;
pub mod element;
pub mod nan;
pub mod network;
pub mod partition;
pub mod pivot;
pub mod vector;

pub use driver::{partial_sort, select, sort};
pub use element::SimdElement;

pub mod prelude {
    pub use crate::driver::{partial_sort, select, sort};
    pub use crate::element::SimdElement;
}
