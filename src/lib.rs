//! labforge - Catalog Retrieval & Lab Synthesis Engine
//!
//! An in-memory semantic retrieval engine over a solution-accelerator
//! catalog, plus a composite lab synthesizer that combines several catalog
//! entries into one integrated hands-on lab.
//!
//! # Architecture
//!
//! - **catalog**: data model, insertion-ordered store, JSON loading
//! - **index**: inverted token index + metadata indices (immutable snapshot)
//! - **retrieval**: ranked token-overlap search with metadata filters
//! - **compose**: multi-entry composite lab synthesis
//! - **context**: single-entry context blocks for document generators

// Core retrieval engine
pub mod catalog;
pub mod errors;
pub mod index;
pub mod retrieval;

// Re-export commonly used types
pub use errors::{ForgeError, Result};

// Synthesis layers
pub mod compose;
pub mod context;

// Harness & observability
pub mod batch;
pub mod cli;
pub mod config;
pub mod telemetry;
