//! Raster pipeline collaborators: the stage list, its executor, and per-build scratch memory.

/// Per-build scratch arena.
pub mod arena;
/// Stage list and lane-batched executor.
pub mod raster;
