//! Road condition survey analytics.
//!
//! The pipeline is load → [`filtering`] → [`aggregation`] → [`report`]:
//! a [`SegmentCollection`] is narrowed by a [`FilterCriteria`] into a
//! borrowed [`SegmentView`], summarized by [`aggregate`], and packaged for
//! rendering by [`build_report`]. Each stage is a pure function of its
//! inputs, so a run can be repeated for every filter change.

pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod filtering;
pub mod formatting;
pub mod io;
pub mod priority;
pub mod report;

pub use crate::aggregation::{aggregate, AggregateReport, DescriptiveStats, Metric, MetricStats};
pub use crate::core::{RoughnessCondition, SegmentCollection, SegmentRecord, SegmentView};
pub use crate::errors::{Error, Result};
pub use crate::filtering::{filter_segments, filter_with_metrics, FilterCriteria};
pub use crate::priority::{classify, classify_iri, needs_repair, PriorityTier};
pub use crate::report::{build_report, PresentationReport};
