//! Single source of truth for what region is currently of interest.
//!
//! The controller owns the active [`Selection`] and is the sole authority
//! for starting and cancelling analysis work. It is transport-free:
//! starting a request means handing the caller a [`PendingRequest`] to
//! execute, and the caller feeds the completion back through
//! [`SessionController::on_resolved`] / [`SessionController::on_rejected`]
//! tagged with the same id. Events are handled one at a time, in arrival
//! order.

use parcel_map_geometry::{GeometryError, LngLat, normalize};
use parcel_map_session_models::{
    ErrorKind, PendingRequest, RequestKind, RequestOutcome, RequestTarget, Selection, SelectionId,
    Snapshot, SnapshotOutcome,
};

use crate::lifecycle::Lifecycle;

/// Orchestrates selections and their analysis requests.
#[derive(Debug, Default)]
pub struct SessionController {
    selection: Selection,
    counter: u64,
    current: SelectionId,
    lifecycle: Lifecycle,
}

impl SessionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a draw-create or draw-update event from the drawing tool.
    ///
    /// Normalizes the raw ring, replaces the active selection, and issues
    /// a polygon analysis request under a fresh id. A redraw while an
    /// earlier request is still in flight supersedes it — the earlier
    /// response will arrive tagged with a stale id and be dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidGeometry`] for degenerate input,
    /// in which case the selection and lifecycle are left untouched and
    /// nothing is sent to the backend.
    pub fn on_polygon_drawn(&mut self, raw: &[LngLat]) -> Result<PendingRequest, GeometryError> {
        let ring = normalize(raw).inspect_err(|e| {
            log::warn!("rejected drawn polygon: {e}");
        })?;

        let id = self.advance();
        self.selection = Selection::Polygon(ring.clone());
        self.lifecycle.begin(id, RequestKind::PolygonAnalysis);
        log::info!(
            "selection {id}: polygon with {} vertices, analysis requested",
            ring.vertex_count()
        );

        Ok(PendingRequest {
            id,
            target: RequestTarget::Polygon(ring),
        })
    }

    /// Handles a draw-delete event or an explicit clear command.
    ///
    /// Drops the selection and logically cancels anything in flight; a
    /// late completion for the old id will be discarded on arrival.
    pub fn on_polygon_cleared(&mut self) {
        self.selection = Selection::None;
        self.lifecycle.reset();
        log::info!("selection cleared");
    }

    /// Handles a map click, issuing a single-parcel lookup.
    ///
    /// A point click supersedes a prior polygon selection and vice versa
    /// — only one selection kind is ever active.
    pub fn on_point_clicked(&mut self, point: LngLat) -> PendingRequest {
        let id = self.advance();
        self.selection = Selection::PointQuery(point);
        self.lifecycle.begin(id, RequestKind::PointLookup);
        log::info!(
            "selection {id}: point ({}, {}), lookup requested",
            point.lng,
            point.lat
        );

        PendingRequest {
            id,
            target: RequestTarget::Point(point),
        }
    }

    /// Feeds back a successful completion for the request tagged `id`.
    ///
    /// Stale completions (any id other than the current selection's) are
    /// dropped without altering state.
    pub fn on_resolved(&mut self, id: SelectionId, outcome: RequestOutcome) {
        self.lifecycle.resolve(id, self.current, outcome);
    }

    /// Feeds back a failed completion for the request tagged `id`.
    ///
    /// Same staleness rule as [`Self::on_resolved`].
    pub fn on_rejected(&mut self, id: SelectionId, error: ErrorKind) {
        self.lifecycle.reject(id, self.current, error);
    }

    /// The active selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Read-only view for the presentation boundary. Pure — aggregation
    /// is recomputed from the held result, and nothing is mutated.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let outcome = self.lifecycle.outcome().map(|outcome| match outcome {
            RequestOutcome::Analysis(result) => {
                SnapshotOutcome::Area(parcel_map_analytics::summarize(result))
            }
            RequestOutcome::Lookup(Some(parcel)) => SnapshotOutcome::ParcelDetail(parcel.clone()),
            RequestOutcome::Lookup(None) => SnapshotOutcome::NoParcelHere,
        });

        Snapshot {
            selection: self.selection.clone(),
            status: self.lifecycle.status(),
            error: self.lifecycle.error().cloned(),
            outcome,
        }
    }

    /// Hands out the next selection id. Ids only ever grow.
    fn advance(&mut self) -> SelectionId {
        self.counter += 1;
        self.current = SelectionId::new(self.counter);
        self.current
    }
}
