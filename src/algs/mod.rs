//! Standalone algorithms used by the database layer.

pub mod iqsort;

pub use iqsort::{search_sorted, sort_indices, sorted_permutation};
