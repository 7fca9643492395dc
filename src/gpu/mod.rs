//! GPU lowering targets.
//!
//! Shaders lower to a [`FragmentProcessor`] graph when a GPU backend is active. Only the node
//! types the combinators and the constant color need are modeled here.

/// Fragment-processor node graph.
pub mod fp;

pub use fp::{FpArgs, FragmentProcessor};
