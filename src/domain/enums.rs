use serde::{Deserialize, Serialize};

/// Coarse time-pressure classification for an active task, derived from the
/// remaining time. Drives row styling and action gating in the presentation
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    /// More than an hour of slack.
    Normal,
    /// Less than an hour left.
    Warning,
    /// Deadline has passed.
    Overdue,
}

impl Urgency {
    /// Whether the presentation layer should offer the finish/edit actions.
    /// Overdue rows keep only the delete action.
    pub fn actions_enabled(&self) -> bool {
        !matches!(self, Self::Overdue)
    }
}

/// Display state of a row in the active list, recomputed on every refresh
/// from the deadline and the current edit session. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Deadline in the future.
    Pending,
    /// Deadline has passed.
    Overdue,
    /// Row is the target of the current edit session; renders as editable
    /// fields instead of Pending/Overdue styling.
    BeingEdited,
}

/// Which screen the presentation layer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    Tasks,
    Archive,
}
