//! Data types for the enrichment pipeline.

pub mod config;
pub mod outcome;
pub mod results;
pub mod table;
