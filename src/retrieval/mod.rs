// Ranked retrieval over the catalog snapshot
pub mod engine;

pub use engine::{Retriever, SearchHit, SearchParams};
