//! Output handling for expanded addresses.

mod batcher;

pub use batcher::{OutputBatcher, DEFAULT_CAPACITY, MIN_CAPACITY};
