use tracing::info;

use crate::action_log::ActionEntry;

/// Trait for action observation
pub trait ActionObserver {
    /// Called after an action has been recorded in the history
    fn on_action(&self, entry: &ActionEntry);
}

/// Emits a structured log event for every recorded action
#[derive(Debug)]
pub struct TracingObserver;

impl ActionObserver for TracingObserver {
    fn on_action(&self, entry: &ActionEntry) {
        info!(sequence = entry.sequence, description = %entry.description, "action recorded");
    }
}
