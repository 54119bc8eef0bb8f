//! Relevance classification and cross-source validation.
//!
//! Both halves are pure functions over strings and caller-supplied keyword
//! tables: no I/O, no shared state, safe to call concurrently. The keyword
//! classifier decides whether an item stays, is reclassified, or is dropped;
//! the validator merges two independently fetched result lists into one
//! deduplicated, confidence-scored list.

pub mod classifier;
pub mod validate;

pub use classifier::{classify, should_exclude, Verdict};
pub use validate::{cross_validate, title_similarity};
