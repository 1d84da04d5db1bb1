use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{TaskState, Urgency, ViewKind};
use super::task::{FinishedTask, Task, TaskId};
use super::timefmt::{deadline_label, finished_label};
use crate::session::SessionMode;

/// Fixed height of one rendered row.
pub const ROW_HEIGHT: u32 = 45;
/// Chrome (header, add-row, buttons) around the task list.
pub const TASKS_CHROME: u32 = 180;
/// Chrome around the archive list.
pub const ARCHIVE_CHROME: u32 = 50;
/// Windows never shrink below this.
pub const MIN_HEIGHT: u32 = 200;

/// Row descriptions longer than this are shortened for display.
const DESCRIPTION_DISPLAY_LIMIT: usize = 43;

/// A derived row of the active task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    /// Full description, used to prefill the edit fields.
    pub description: String,
    /// Display form of the description (shortened when long).
    pub short_description: String,
    pub deadline: NaiveDateTime,
    /// Relative-time wording, e.g. "2 days left" or "30 minutes late!".
    pub time_label: String,
    pub urgency: Urgency,
    pub state: TaskState,
}

/// A derived row of the finished-task archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRow {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub completed_at: NaiveDateTime,
    /// Elapsed-time wording, e.g. "3 hours ago".
    pub time_label: String,
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub rows: Vec<TaskRow>,
    pub archive_rows: Vec<ArchiveRow>,
    pub session: SessionMode,
    pub view: ViewKind,
    /// Window height suggestion for the current view.
    pub height_hint: u32,
}

impl ViewModel {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            archive_rows: Vec::new(),
            session: SessionMode::Idle,
            view: ViewKind::Tasks,
            height_hint: MIN_HEIGHT,
        }
    }
}

/// Shorten a long description for row display: 43+ characters become the
/// first 40 plus an ellipsis.
pub fn short_description(description: &str) -> String {
    if description.chars().count() >= DESCRIPTION_DISPLAY_LIMIT {
        let head: String = description.chars().take(40).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

/// Derive the display row for an active task. `edited` is the current edit
/// target, if any; that row suppresses Pending/Overdue styling.
pub fn task_row(task: &Task, now: NaiveDateTime, edited: Option<TaskId>) -> TaskRow {
    let delta = (task.deadline - now).num_seconds();
    let (time_label, urgency) = deadline_label(delta);
    let state = if edited == Some(task.id) {
        TaskState::BeingEdited
    } else if delta <= 0 {
        TaskState::Overdue
    } else {
        TaskState::Pending
    };

    TaskRow {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        short_description: short_description(&task.description),
        deadline: task.deadline,
        time_label,
        urgency,
        state,
    }
}

/// Derive the display row for an archived task.
pub fn archive_row(task: &FinishedTask, now: NaiveDateTime) -> ArchiveRow {
    let elapsed = (now - task.completed_at).num_seconds();
    ArchiveRow {
        title: task.title.clone(),
        description: task.description.clone(),
        short_description: short_description(&task.description),
        completed_at: task.completed_at,
        time_label: finished_label(elapsed),
    }
}

/// Window height for `rows` rows of the given view, floor-clamped.
pub fn height_hint(rows: usize, view: ViewKind) -> u32 {
    let chrome = match view {
        ViewKind::Tasks => TASKS_CHROME,
        ViewKind::Archive => ARCHIVE_CHROME,
    };
    let height = rows as u32 * ROW_HEIGHT + chrome;
    height.max(MIN_HEIGHT)
}
