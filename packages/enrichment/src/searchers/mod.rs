//! Web searcher implementations.

pub mod serpapi;

pub use serpapi::SerpWebSearcher;
