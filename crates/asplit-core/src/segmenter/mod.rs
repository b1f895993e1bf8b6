//! Time-range math and segment planning.
//!
//! Splits `[start, end)` of a recording into consecutive segments of a fixed
//! length and derives each segment's output file name.

mod naming;
mod range;

pub use naming::OutputNaming;
pub use range::{last_sequence, plan_segments, Segment};
