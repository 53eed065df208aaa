//! The draft buffer.
//!
//! Provides a rope-backed text buffer with a char-offset cursor,
//! designed for integration into the TEA architecture.

mod buffer;

pub use buffer::{Direction, EditorBuffer};
