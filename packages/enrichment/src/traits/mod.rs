//! Trait seams for the enrichment pipeline.
//!
//! Network collaborators are injected through these traits so the
//! orchestrator can be driven by configured clients or test doubles.

pub mod completer;
pub mod searcher;
