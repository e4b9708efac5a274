//! twenty Engine - Core game types and logic
//!
//! This crate holds the dataset model and its tabular persistence, the
//! decision tree node types, the interactive traverser and the knowledge
//! updater. Tree construction lives in the `twenty-tree` crate.
//!
//! The engine is front-end agnostic: it talks to the player only through
//! the [`Interaction`] trait and orders guesses through [`GuessOrder`].

pub mod dataset;
pub mod error;
pub mod interaction;
pub mod knowledge;
pub mod node;
pub mod order;
pub mod storage;
pub mod traverse;

pub use dataset::{Dataset, Record};
pub use error::{EngineError, Result};
pub use interaction::{Interaction, ScriptedInteraction};
pub use node::{DecisionTree, Node};
pub use order::GuessOrder;
pub use storage::{CsvStore, DatasetStore, MemoryStore};
pub use traverse::{traverse, Traversal};
