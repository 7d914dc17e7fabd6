//! Index engine implementations.
//!
//! Production deployments bring their own engine behind
//! [`crate::engine::IndexEngine`]. The in-memory engine here exists so
//! the compile → execute → filter pipeline can be exercised end-to-end
//! without external index storage.

pub mod memory;

pub use memory::{Analyzer, IndexedDocument, MemoryIndex, SimpleAnalyzer};
