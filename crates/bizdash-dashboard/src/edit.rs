//! Edit dialog state machine
//!
//! `Closed -> Open -> Submitting -> Closed` on success, or back to `Open`
//! with the draft untouched on failure. The draft is a detached copy of the
//! item's editable fields and never aliases the collection.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

use crate::error::{DashboardError, DashboardResult};

/// Where the edit dialog of one view currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState<K, D> {
    /// No dialog
    Closed,
    /// Dialog open, draft editable
    Open {
        /// Identity of the item being edited
        key: K,
        /// Local copy of the editable fields
        draft: D,
    },
    /// The full draft has been sent and the request has not settled
    Submitting {
        /// Identity of the item being edited
        key: K,
        /// Draft as it was sent
        draft: D,
    },
}

/// A draft handed out for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<K, D> {
    /// Identity of the item being edited
    pub key: K,
    /// Full draft payload
    pub draft: D,
    generation: u64,
}

/// How a submission settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Success; the dialog closed and the collection should be refetched
    Closed,
    /// Failure; the dialog is open again with the same draft
    Reopened,
    /// The dialog was closed or reopened for another item meanwhile
    Superseded,
}

/// One view's edit dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFlow<K, D> {
    state: EditState<K, D>,
    generation: u64,
}

impl<K, D> Default for EditFlow<K, D> {
    fn default() -> Self {
        Self {
            state: EditState::Closed,
            generation: 0,
        }
    }
}

impl<K: Clone + PartialEq, D: Clone> EditFlow<K, D> {
    /// Create a closed dialog
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub const fn state(&self) -> &EditState<K, D> {
        &self.state
    }

    /// Whether a dialog is showing, submitting or not
    pub const fn is_open(&self) -> bool {
        !matches!(self.state, EditState::Closed)
    }

    /// Whether a submission is in flight
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, EditState::Submitting { .. })
    }

    /// Identity of the item in the dialog
    pub const fn key(&self) -> Option<&K> {
        match &self.state {
            EditState::Closed => None,
            EditState::Open { key, .. } | EditState::Submitting { key, .. } => Some(key),
        }
    }

    /// The draft, if a dialog is showing
    pub const fn draft(&self) -> Option<&D> {
        match &self.state {
            EditState::Closed => None,
            EditState::Open { draft, .. } | EditState::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Open the dialog for `key`, replacing any dialog already showing
    pub fn open(&mut self, key: K, draft: D) {
        self.generation += 1;
        self.state = EditState::Open { key, draft };
    }

    /// Close the dialog and discard the draft
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = EditState::Closed;
    }

    /// Mutate the draft in place
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoDraft`] when no dialog is open and
    /// [`DashboardError::SubmitInFlight`] while the draft is being submitted.
    pub fn update(&mut self, edit: impl FnOnce(&mut D)) -> DashboardResult<()> {
        match &mut self.state {
            EditState::Open { draft, .. } => {
                edit(draft);
                Ok(())
            }
            EditState::Submitting { .. } => Err(DashboardError::SubmitInFlight),
            EditState::Closed => Err(DashboardError::NoDraft),
        }
    }

    /// Move to `Submitting` and hand out the full draft
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoDraft`] when no dialog is open and
    /// [`DashboardError::SubmitInFlight`] if a submission is already running.
    pub fn begin_submit(&mut self) -> DashboardResult<Submission<K, D>> {
        let state = std::mem::replace(&mut self.state, EditState::Closed);
        match state {
            EditState::Open { key, draft } => {
                let submission = Submission {
                    key: key.clone(),
                    draft: draft.clone(),
                    generation: self.generation,
                };
                self.state = EditState::Submitting { key, draft };
                Ok(submission)
            }
            EditState::Submitting { .. } => {
                self.state = state;
                Err(DashboardError::SubmitInFlight)
            }
            EditState::Closed => Err(DashboardError::NoDraft),
        }
    }

    /// Settle `submission`
    ///
    /// A submission whose dialog has since been closed or replaced leaves the
    /// current dialog alone.
    pub fn finish_submit(&mut self, submission: &Submission<K, D>, succeeded: bool) -> Settled {
        if submission.generation != self.generation || !self.is_submitting() {
            return Settled::Superseded;
        }

        let state = std::mem::replace(&mut self.state, EditState::Closed);
        if succeeded {
            self.generation += 1;
            return Settled::Closed;
        }
        if let EditState::Submitting { key, draft } = state {
            self.state = EditState::Open { key, draft };
        }
        Settled::Reopened
    }
}

/// Cloneable handle to a view's [`EditFlow`]
///
/// The lock is only held for the synchronous transitions, never while the
/// submission request is awaited.
#[derive(Debug)]
pub struct EditDialog<K, D> {
    flow: Arc<Mutex<EditFlow<K, D>>>,
}

impl<K, D> Clone for EditDialog<K, D> {
    fn clone(&self) -> Self {
        Self {
            flow: Arc::clone(&self.flow),
        }
    }
}

impl<K, D> Default for EditDialog<K, D> {
    fn default() -> Self {
        Self {
            flow: Arc::new(Mutex::new(EditFlow::default())),
        }
    }
}

impl<K: Clone + PartialEq, D: Clone> EditDialog<K, D> {
    /// Create a closed dialog
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn state(&self) -> EditState<K, D> {
        self.flow.lock().state().clone()
    }

    /// Copy of the current draft
    pub fn draft(&self) -> Option<D> {
        self.flow.lock().draft().cloned()
    }

    /// See [`EditFlow::open`]
    pub fn open(&self, key: K, draft: D) {
        self.flow.lock().open(key, draft);
    }

    /// See [`EditFlow::close`]
    pub fn close(&self) {
        self.flow.lock().close();
    }

    /// See [`EditFlow::update`]
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open or a submission is in flight.
    pub fn update(&self, edit: impl FnOnce(&mut D)) -> DashboardResult<()> {
        self.flow.lock().update(edit)
    }

    /// Submit the full draft through `send` and settle the dialog
    ///
    /// On failure the dialog is reopened with its draft and the error is
    /// returned. Dropping the returned future before it completes counts as
    /// a failure, so the dialog is never left in `Submitting`.
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open, a submission is already running, or
    /// `send` fails.
    pub async fn submit<F, Fut>(&self, send: F) -> DashboardResult<Settled>
    where
        F: FnOnce(Submission<K, D>) -> Fut,
        Fut: Future<Output = DashboardResult<()>>,
    {
        let submission = self.flow.lock().begin_submit()?;
        let guard = SubmitGuard {
            flow: &*self.flow,
            submission: Some(submission.clone()),
        };
        let result = send(submission).await;
        let settled = guard.settle(result.is_ok());
        result.map(|()| settled)
    }
}

/// Settles an in-flight submission as failed when dropped unsettled
struct SubmitGuard<'a, K: Clone + PartialEq, D: Clone> {
    flow: &'a Mutex<EditFlow<K, D>>,
    submission: Option<Submission<K, D>>,
}

impl<K: Clone + PartialEq, D: Clone> SubmitGuard<'_, K, D> {
    fn settle(mut self, succeeded: bool) -> Settled {
        self.submission
            .take()
            .map_or(Settled::Superseded, |submission| {
                self.flow.lock().finish_submit(&submission, succeeded)
            })
    }
}

impl<K: Clone + PartialEq, D: Clone> Drop for SubmitGuard<'_, K, D> {
    fn drop(&mut self) {
        if let Some(submission) = self.submission.take() {
            self.flow.lock().finish_submit(&submission, false);
        }
    }
}
