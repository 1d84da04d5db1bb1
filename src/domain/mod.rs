pub mod enums;
pub mod task;
pub mod timefmt;
pub mod views;

pub use enums::{TaskState, Urgency, ViewKind};
pub use task::{
    format_timestamp, parse_timestamp, FinishedTask, Task, TaskFields, TaskId, TIMESTAMP_FORMAT,
};
pub use timefmt::{deadline_label, finished_label};
pub use views::{
    archive_row, height_hint, short_description, task_row, ArchiveRow, TaskRow, ViewModel,
};
