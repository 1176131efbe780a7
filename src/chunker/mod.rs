//! Chunked transfer engine.
//!
//! - [`TransferChunker`] - Bounded copy loop feeding an accumulator

mod engine;

pub use engine::TransferChunker;
