//! Core types: slots, cutoffs, filtering, merging, formatting

pub mod error;
pub mod filter;
pub mod format;
pub mod merge;
pub mod pipeline;
pub mod time;
pub mod tracing;

pub use error::{CoreError, CoreResult};
pub use filter::{FilterConfig, accept};
pub use format::{format_interval, format_time_of_day};
pub use merge::merge;
pub use pipeline::{AvailabilityPipeline, RawSlot, SlotDay};
pub use time::{Interval, Slot, TimeOfDay};
pub use tracing::{TracingConfig, TracingError, init_tracing};
