//! Filler notification port
//!
//! Defines how "please wait" messages reach the agent host before a slow
//! handler starts.

/// Receiver of filler messages
///
/// Called synchronously from the dispatcher right before the handler runs.
/// Implementations must not block; anything slow (network sends, speech
/// synthesis) should be handed off to a channel or spawned task.
pub trait FillerNotifier: Send + Sync {
    /// Called with the filler chosen for `tool_name`
    fn on_filler(&self, tool_name: &str, text: &str);
}
