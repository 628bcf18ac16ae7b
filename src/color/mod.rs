//! Pixel color classification into stacked-bar categories.
//!
//! Each category owns an independent RGB predicate. The predicates are not
//! disjoint in general, so the classifier resolves overlaps with an explicit
//! priority order: the first category in that order whose predicate matches wins.

pub mod classifier;

pub use classifier::{Category, ColorClassifier, PixelClassifier, Priority};
