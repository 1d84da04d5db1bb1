//! Application core: the command surface the presentation layer drives.
//!
//! [`App`] owns the store, the single edit session, and the last published
//! view model. An external timer calls [`App::tick`] (see [`crate::ticker`]);
//! user actions arrive through the remaining methods. Every operation takes
//! one clock snapshot from the injected now-source and threads it through
//! derivation and validation, so a single refresh never mixes clocks.

use chrono::{Duration, Local, NaiveDateTime};
use tracing::{debug, trace};

use crate::domain::views::{archive_row, height_hint, task_row};
use crate::domain::{TaskFields, TaskId, ViewKind, ViewModel};
use crate::error::{Error, Result, ValidationError};
use crate::persistence::TaskStore;
use crate::session::{EditSession, SessionMode};

/// Injected clock. Defaults to the local wall clock; tests substitute a
/// controlled one.
pub type NowSource = Box<dyn Fn() -> NaiveDateTime + Send>;

fn wall_clock() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Session controller and refresh coordinator over a [`TaskStore`].
pub struct App {
    store: TaskStore,
    session: EditSession,
    view_kind: ViewKind,
    view: ViewModel,
    now_source: NowSource,
}

impl App {
    /// Build an app over the given store and publish an initial view.
    pub fn new(store: TaskStore) -> Result<Self> {
        Self::with_clock(store, Box::new(wall_clock))
    }

    /// Build an app with an explicit now-source.
    pub fn with_clock(store: TaskStore, now_source: NowSource) -> Result<Self> {
        let mut app = Self {
            store,
            session: EditSession::new(),
            view_kind: ViewKind::Tasks,
            view: ViewModel::empty(),
            now_source,
        };
        app.refresh()?;
        Ok(app)
    }

    /// The last published view model.
    pub fn view_model(&self) -> &ViewModel {
        &self.view
    }

    /// Periodic refresh driven by the external timer. A no-op while a
    /// create or edit is in progress, so typed input is never clobbered.
    pub fn tick(&mut self) -> Result<()> {
        if !self.session.is_idle() {
            trace!("tick skipped, session active");
            return Ok(());
        }
        debug!("tick refresh");
        self.refresh()
    }

    /// Switch between the task list and the archive. Always refreshes;
    /// the archive has no editable session to protect.
    pub fn switch_view(&mut self, to_archive: bool) -> Result<()> {
        self.view_kind = if to_archive {
            ViewKind::Archive
        } else {
            ViewKind::Tasks
        };
        self.refresh()
    }

    /// Open the new-task row. Abandons an in-progress edit.
    pub fn begin_create(&mut self) -> Result<()> {
        self.session.begin_create();
        self.refresh()
    }

    /// Start editing a row. A stale id (deleted since the last refresh) is
    /// non-fatal: the view is refreshed and the session stays as it was.
    pub fn begin_edit(&mut self, id: TaskId) -> Result<()> {
        if !self.store.contains(id)? {
            debug!(id, "edit target no longer exists");
            return self.refresh();
        }
        self.session.begin_edit(id);
        self.refresh()
    }

    /// Abandon the in-progress create or edit.
    pub fn cancel_session(&mut self) -> Result<()> {
        self.session.cancel();
        self.refresh()
    }

    /// Commit the in-progress create or edit with the given fields.
    ///
    /// Validation runs in a fixed order (title, description, deadline) and
    /// the first failure is returned with the session left untouched, so
    /// the user's entered values survive. Only a successful commit returns
    /// the session to idle.
    pub fn accept(&mut self, fields: TaskFields) -> Result<()> {
        let now = (self.now_source)();
        validate(&fields, now)?;

        match self.session.mode() {
            SessionMode::Creating => {
                self.store.insert(&fields)?;
            }
            SessionMode::Editing(id) => match self.store.update(id, &fields) {
                Err(Error::NotFound(_)) => {
                    debug!(id, "edited row vanished before accept");
                }
                other => other?,
            },
            SessionMode::Idle => return Err(Error::NoSession),
        }

        self.session.cancel();
        self.refresh_at(now)
    }

    /// Delete a row. Legal in any state; deleting the row under edit also
    /// resets the session so it cannot reference a missing target.
    pub fn delete_task(&mut self, id: TaskId) -> Result<()> {
        self.store.delete(id)?;
        if self.session.edited_id() == Some(id) {
            self.session.cancel();
        }
        self.refresh()
    }

    /// Move a row to the finished archive. Rejected while that row is being
    /// edited; a stale id is a non-fatal no-op.
    pub fn finish_task(&mut self, id: TaskId) -> Result<()> {
        if self.session.edited_id() == Some(id) {
            return Err(Error::EditInProgress(id));
        }

        let now = (self.now_source)();
        match self.store.finish(id, now) {
            Err(Error::NotFound(_)) => {
                debug!(id, "finish target no longer exists");
            }
            other => other?,
        }
        self.refresh_at(now)
    }

    fn refresh(&mut self) -> Result<()> {
        let now = (self.now_source)();
        self.refresh_at(now)
    }

    /// Re-derive the full view model from the store at one clock snapshot.
    fn refresh_at(&mut self, now: NaiveDateTime) -> Result<()> {
        let edited = self.session.edited_id();

        let rows: Vec<_> = self
            .store
            .list_active()?
            .iter()
            .map(|task| task_row(task, now, edited))
            .collect();
        let archive_rows: Vec<_> = self
            .store
            .list_finished()?
            .iter()
            .map(|task| archive_row(task, now))
            .collect();

        let hint = match self.view_kind {
            ViewKind::Tasks => height_hint(self.store.count()? as usize, ViewKind::Tasks),
            ViewKind::Archive => height_hint(archive_rows.len(), ViewKind::Archive),
        };

        self.view = ViewModel {
            rows,
            archive_rows,
            session: self.session.mode(),
            view: self.view_kind,
            height_hint: hint,
        };
        Ok(())
    }
}

/// Shared validation for the create and edit accept paths. Fixed order,
/// first failure wins. Deadlines up to one hour in the past are accepted.
fn validate(fields: &TaskFields, now: NaiveDateTime) -> Result<()> {
    if fields.title.is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }
    if fields.description.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    if fields.deadline < now - Duration::hours(1) {
        return Err(ValidationError::InvalidDeadline.into());
    }
    Ok(())
}
