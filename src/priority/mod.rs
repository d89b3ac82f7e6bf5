pub mod tiers;

pub use tiers::{
    classify, classify_iri, needs_repair, PriorityTier, HIGH_PRIORITY_IRI, LOW_PRIORITY_IRI,
    MEDIUM_PRIORITY_IRI,
};
