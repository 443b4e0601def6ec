//! Concept extraction cache.

mod model;

pub use model::{Concept, ExtractedConcept, MAX_IMPORTANCE, MIN_IMPORTANCE};
