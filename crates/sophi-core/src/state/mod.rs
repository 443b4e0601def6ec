//! Application aggregate.

mod model;

pub use model::{ConceptMergeSummary, SophiData};
