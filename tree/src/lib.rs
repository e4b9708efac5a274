//! twenty Tree Builder - Decision tree construction
//!
//! This crate turns a [`Dataset`](twenty_engine::Dataset) into a
//! [`DecisionTree`](twenty_engine::DecisionTree): the question selector picks
//! the most balanced attribute, the builder partitions on it recursively.

pub mod build;
pub mod select;

pub use build::{build, build_tree};
pub use select::{select_attribute, split_score, Entry};
