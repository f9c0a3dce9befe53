//! Storage layer for task persistence.

pub mod codec;
mod file;
mod traits;

pub use file::{FileStorage, DEFAULT_DATA_FILE};
pub use traits::Storage;
