pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod pool;
pub mod probe;
pub mod render;
pub mod request;
pub mod segmenter;
pub mod split;
pub mod timecode;

pub use error::SplitError;
pub use request::{SplitOptions, SplitRequest};
pub use split::{run_split, run_split_reporting, SplitSummary};
