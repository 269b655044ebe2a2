//! Context segmentation with auto-backoff.

pub mod segmenter;
pub mod stats;

pub use segmenter::{ContextSegmenter, Segment, SegmentMap};
pub use stats::SegmentStats;
