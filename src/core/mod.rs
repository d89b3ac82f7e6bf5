pub mod types;
pub mod validation;

pub use types::{RoughnessCondition, SegmentCollection, SegmentRecord, SegmentView};
pub use validation::{is_well_formed, validate_record, RecordIssue};
