/// Tier classification for repair prioritization
///
/// Tiers are a pure function of a segment's IRI. They are derived on demand
/// and never stored on the record.
use crate::core::SegmentRecord;
use serde::{Deserialize, Serialize};

/// IRI above which a segment is high priority and needs repair (m/km)
pub const HIGH_PRIORITY_IRI: f64 = 8.0;

/// IRI above which a segment is at least medium priority (m/km)
pub const MEDIUM_PRIORITY_IRI: f64 = 5.0;

/// IRI above which a segment is at least low priority (m/km)
pub const LOW_PRIORITY_IRI: f64 = 3.0;

/// Repair priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    /// IRI > 8: reconstruction or thick overlay
    High,

    /// 5 < IRI <= 8: thin overlay or extensive patching
    Medium,

    /// 3 < IRI <= 5: routine maintenance
    Low,

    /// IRI <= 3: no action
    None,

    /// IRI is negative or not a number
    Unclassified,
}

impl PriorityTier {
    /// Tiers that carry a repair recommendation, most urgent first
    pub const ACTIONABLE: [PriorityTier; 3] =
        [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low];

    /// Get tier label for display
    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::High => "High Priority",
            PriorityTier::Medium => "Medium Priority",
            PriorityTier::Low => "Low Priority",
            PriorityTier::None => "No Action",
            PriorityTier::Unclassified => "Unclassified",
        }
    }

    /// IRI range covered by the tier, for display
    pub fn range_label(&self) -> &'static str {
        match self {
            PriorityTier::High => "IRI > 8 m/km",
            PriorityTier::Medium => "5 < IRI <= 8 m/km",
            PriorityTier::Low => "3 < IRI <= 5 m/km",
            PriorityTier::None => "IRI <= 3 m/km",
            PriorityTier::Unclassified => "invalid IRI",
        }
    }

    /// Fixed recommended action, if the tier has one
    pub fn recommended_action(&self) -> Option<&'static str> {
        match self {
            PriorityTier::High => Some("reconstruction/thick overlay"),
            PriorityTier::Medium => Some("thin overlay or extensive patching"),
            PriorityTier::Low => Some("routine maintenance/patching"),
            PriorityTier::None | PriorityTier::Unclassified => None,
        }
    }
}

/// Classify an IRI value.
///
/// Each cut is half-open with the boundary value belonging to the lower
/// tier: exactly 8.0 is Medium, exactly 5.0 is Low, exactly 3.0 is None.
pub fn classify_iri(iri: f64) -> PriorityTier {
    if !iri.is_finite() || iri < 0.0 {
        return PriorityTier::Unclassified;
    }

    if iri > HIGH_PRIORITY_IRI {
        PriorityTier::High
    } else if iri > MEDIUM_PRIORITY_IRI {
        PriorityTier::Medium
    } else if iri > LOW_PRIORITY_IRI {
        PriorityTier::Low
    } else {
        PriorityTier::None
    }
}

/// Classify a segment into a priority tier
pub fn classify(record: &SegmentRecord) -> PriorityTier {
    classify_iri(record.iri)
}

/// A segment needs repair iff its IRI is strictly above 8
pub fn needs_repair(record: &SegmentRecord) -> bool {
    record.iri > HIGH_PRIORITY_IRI
}
