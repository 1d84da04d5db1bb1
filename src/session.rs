//! The single in-process create/edit session.
//!
//! An owned state machine, handed to whoever needs to query or drive it,
//! never ambient state. At most one of Creating/Editing holds at a time.

use serde::{Deserialize, Serialize};

use crate::domain::TaskId;

/// What the user is currently doing with the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// No create or edit in progress.
    Idle,
    /// The new-task entry row is open.
    Creating,
    /// The row with this id renders as editable fields.
    Editing(TaskId),
}

/// Transient per-client session record. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditSession {
    mode: SessionMode,
}

impl Default for SessionMode {
    fn default() -> Self {
        Self::Idle
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == SessionMode::Idle
    }

    /// The row currently being edited, if any.
    pub fn edited_id(&self) -> Option<TaskId> {
        match self.mode {
            SessionMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    /// Open the new-task row. An in-progress edit is abandoned; calling this
    /// while already creating changes nothing.
    pub fn begin_create(&mut self) {
        self.mode = SessionMode::Creating;
    }

    /// Start editing `id`. An in-progress create is abandoned, as is an edit
    /// of a different row.
    pub fn begin_edit(&mut self, id: TaskId) {
        self.mode = SessionMode::Editing(id);
    }

    /// Abandon whatever is in progress.
    pub fn cancel(&mut self) {
        self.mode = SessionMode::Idle;
    }
}
