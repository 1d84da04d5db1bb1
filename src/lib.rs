//! duely - a deadline-driven to-do core.
//!
//! Active tasks carry a title, description, and deadline; finishing a task
//! moves it to a durable archive stamped with the completion time. Display
//! state (pending/overdue) and relative-time labels are derived from stored
//! timestamps at refresh time, never stored. The crate exposes a command
//! surface ([`App`]) plus a serializable [`ViewModel`] for whatever
//! presentation layer sits on top; an external timer is expected to drive
//! [`App::tick`] at the cadence documented in [`ticker`].

pub mod app;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod session;
pub mod ticker;

pub use app::{App, NowSource};
pub use domain::{
    ArchiveRow, FinishedTask, Task, TaskFields, TaskId, TaskRow, TaskState, Urgency, ViewKind,
    ViewModel,
};
pub use error::{Error, Result, ValidationError};
pub use persistence::TaskStore;
pub use session::{EditSession, SessionMode};
