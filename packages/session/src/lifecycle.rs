//! One outbound analysis/lookup call as an explicit state machine.
//!
//! Transitions: `Idle → Pending` on begin, `Pending → Success`/`Error`
//! on a completion whose id matches the controller's current selection,
//! and anything → `Idle` on reset. Completions carrying any other id are
//! dropped silently — that drop is the cancellation mechanism, and it is
//! an invariant worth testing, not a failure.

use parcel_map_session_models::{
    ErrorKind, LifecycleStatus, RequestKind, RequestOutcome, SelectionId,
};

/// State of the one request associated with the current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lifecycle {
    /// No request in flight or resolved.
    #[default]
    Idle,
    /// A request was issued and has not completed.
    Pending {
        /// Selection that spawned the request.
        id: SelectionId,
        /// What was asked of the backend.
        kind: RequestKind,
    },
    /// The request completed and its outcome is current.
    Success {
        /// Selection the outcome belongs to.
        id: SelectionId,
        /// Parsed response. A lookup that found nothing resolves here
        /// with `RequestOutcome::Lookup(None)`, not in `Error`.
        outcome: RequestOutcome,
    },
    /// The request failed.
    Error {
        /// Selection the failure belongs to.
        id: SelectionId,
        /// What was asked of the backend.
        kind: RequestKind,
        /// Classified failure.
        error: ErrorKind,
    },
}

impl Lifecycle {
    /// Enters `Pending` for a freshly issued request.
    ///
    /// No-op if a pending request already carries a newer id — an older
    /// selection can never steal the lifecycle back.
    pub fn begin(&mut self, id: SelectionId, kind: RequestKind) {
        if let Self::Pending { id: existing, .. } = self
            && *existing > id
        {
            log::debug!("ignoring begin for {id}: {existing} already pending");
            return;
        }
        *self = Self::Pending { id, kind };
    }

    /// Records a successful completion, if it is still current.
    ///
    /// `current` is the controller's present selection id; a completion
    /// tagged with anything else is stale and dropped without touching
    /// state.
    pub fn resolve(&mut self, id: SelectionId, current: SelectionId, outcome: RequestOutcome) {
        if !self.accepts(id, current) {
            log::debug!("dropping stale response for {id} (current selection is {current})");
            return;
        }
        *self = Self::Success { id, outcome };
    }

    /// Records a failed completion, if it is still current.
    ///
    /// Same staleness rule as [`Self::resolve`]: a stale failure is
    /// dropped, never surfaced as an error.
    pub fn reject(&mut self, id: SelectionId, current: SelectionId, error: ErrorKind) {
        if !self.accepts(id, current) {
            log::debug!("dropping stale failure for {id} (current selection is {current})");
            return;
        }
        if let Self::Pending { kind, .. } = self {
            let kind = *kind;
            *self = Self::Error { id, kind, error };
        }
    }

    /// Returns to `Idle`, logically cancelling whatever was tracked.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// A completion is accepted only if it matches the controller's
    /// current selection and that selection's request is still pending.
    fn accepts(&self, id: SelectionId, current: SelectionId) -> bool {
        id == current && matches!(self, Self::Pending { id: pending, .. } if *pending == id)
    }

    /// Coarse status for the presentation boundary.
    #[must_use]
    pub const fn status(&self) -> LifecycleStatus {
        match self {
            Self::Idle => LifecycleStatus::Idle,
            Self::Pending { .. } => LifecycleStatus::Pending,
            Self::Success { .. } => LifecycleStatus::Success,
            Self::Error { .. } => LifecycleStatus::Error,
        }
    }

    /// The resolved outcome, when in `Success`.
    #[must_use]
    pub const fn outcome(&self) -> Option<&RequestOutcome> {
        match self {
            Self::Success { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// The classified failure, when in `Error`.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorKind> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}
