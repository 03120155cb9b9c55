//! History reconciliation and the transcript.
//!
//! The transcript keeps insertion order as display order. It has three parts:
//! live units that arrived before the view had any history, the reconciled
//! history, and live units that arrived after it. Reconciling a batch replaces
//! the history part in place, so replaying the same batch is harmless and live
//! units are never interleaved with history records.

use chatroom_proto::{HistoryBatch, LineScope};

use crate::{
    IdentityTracker,
    present::{EMPTY_HISTORY_NOTICE, PresentationUnit},
};

/// Ordered transcript of the current view.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    earlier: Vec<PresentationUnit>,
    history: Vec<PresentationUnit>,
    live: Vec<PresentationUnit>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every unit.
    pub fn clear(&mut self) {
        self.earlier.clear();
        self.history.clear();
        self.live.clear();
    }

    /// Replace the history part with `batch`.
    ///
    /// Records are put in chronological order. An empty batch yields a single
    /// notice. The history always ends with a separator.
    pub fn reconcile(&mut self, scope: LineScope, batch: HistoryBatch, identity: &IdentityTracker) {
        let heading = batch.heading.clone();
        let records = batch.chronological();

        let mut units = Vec::with_capacity(records.len().saturating_add(2));
        if let Some(heading) = heading {
            units.push(PresentationUnit::system(scope, heading));
        }
        if records.is_empty() {
            units.push(PresentationUnit::system(scope, EMPTY_HISTORY_NOTICE));
        }
        for record in records {
            units.push(PresentationUnit::from_line(record, identity));
        }
        units.push(PresentationUnit::separator(scope));

        self.history.clear();
        for unit in units {
            let previous = self.history.last().or_else(|| self.earlier.last());
            let unit = Self::linked(unit, previous);
            self.history.push(unit);
        }
    }

    /// Append a live unit after everything else.
    pub fn push(&mut self, unit: PresentationUnit) {
        if self.history.is_empty() {
            let unit = Self::linked(unit, self.earlier.last());
            self.earlier.push(unit);
        } else {
            let previous = self.live.last().or_else(|| self.history.last());
            let unit = Self::linked(unit, previous);
            self.live.push(unit);
        }
    }

    fn linked(mut unit: PresentationUnit, previous: Option<&PresentationUnit>) -> PresentationUnit {
        unit.continues_previous = previous.is_some_and(|previous| unit.follows(previous));
        unit
    }

    /// All units in display order.
    pub fn units(&self) -> impl Iterator<Item = &PresentationUnit> {
        self.earlier.iter().chain(self.history.iter()).chain(self.live.iter())
    }

    /// Reconciled history units.
    pub fn history(&self) -> &[PresentationUnit] {
        &self.history
    }

    /// Live units, in arrival order, whether they came before or after the
    /// history.
    pub fn live(&self) -> impl Iterator<Item = &PresentationUnit> {
        self.earlier.iter().chain(self.live.iter())
    }

    /// Total number of units.
    pub fn len(&self) -> usize {
        self.earlier.len().saturating_add(self.history.len()).saturating_add(self.live.len())
    }

    /// Whether the transcript has no units.
    pub fn is_empty(&self) -> bool {
        self.earlier.is_empty() && self.history.is_empty() && self.live.is_empty()
    }
}
