//! Services shared by tool handlers
//!
//! - [`memo`]: bounded memoization of pure lookups
//! - [`fan_out`]: parallel warehouse probes under a deadline
//! - [`guard`]: single outbound call under a deadline

pub mod fan_out;
pub mod guard;
pub mod memo;

pub use fan_out::{FanOutAggregator, FanOutReport, ProbeOutcome, ProbeResult};
pub use guard::{GuardError, call_with_timeout};
pub use memo::{MemoStats, MemoTable};
