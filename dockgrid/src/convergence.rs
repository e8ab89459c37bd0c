use std::collections::HashSet;

use bitflags::bitflags;
use dockgrid_common::{Inset, InsetKey};

bitflags! {
    /// Reasons a layout pass did not settle. Several may hold at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayoutChanges: u8 {
        const LOOP_DETECTED = 1;
        const NORMAL_PADDINGS_CHANGED = 1 << 1;
        const OVERFLOW_PADDINGS_CHANGED = 1 << 2;
        const OWN_CLIENT_SIZE_CHANGED = 1 << 3;
        const MARGINS_CHANGED = 1 << 4;
    }
}

impl LayoutChanges {
    /// Changes that require laying the children out again
    pub fn requires_relayout(&self) -> bool {
        self.intersects(
            LayoutChanges::MARGINS_CHANGED
                | LayoutChanges::NORMAL_PADDINGS_CHANGED
                | LayoutChanges::OWN_CLIENT_SIZE_CHANGED,
        )
    }
}

/// Summary of how a layout computation converged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDiagnostics {
    /// Margin passes, summed over restarts
    pub margin_iterations: usize,
    /// Padding passes, summed over restarts
    pub padding_iterations: usize,
    pub client_size_growths: usize,
    /// Margin passes re-run because a side child changed its thickness
    /// while paddings were negotiated
    pub margin_restarts: usize,
    /// Every change raised during the computation
    pub changes: LayoutChanges,
    pub disaster_recovery: bool,
}

/// Iteration counters and padding history of one layout computation
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    precision: u32,
    margin_iterations: usize,
    padding_iterations: usize,
    client_size_growths: usize,
    margin_restarts: usize,
    padding_history: HashSet<(usize, InsetKey)>,
    changes: LayoutChanges,
}

impl ConvergenceTracker {
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            margin_iterations: 0,
            padding_iterations: 0,
            client_size_growths: 0,
            margin_restarts: 0,
            padding_history: HashSet::new(),
            changes: LayoutChanges::empty(),
        }
    }

    pub fn start_margin_iteration(&mut self) {
        self.margin_iterations += 1;
    }

    pub fn start_padding_iteration(&mut self) {
        self.padding_iterations += 1;
    }

    pub fn record(&mut self, changes: LayoutChanges) {
        self.changes |= changes;
    }

    pub fn record_growth(&mut self) {
        self.client_size_growths += 1;
    }

    pub fn record_margin_restart(&mut self) {
        self.margin_restarts += 1;
    }

    pub fn client_size_growths(&self) -> usize {
        self.client_size_growths
    }

    /// Growths and margin restarts, which share one budget
    pub fn restarts(&self) -> usize {
        self.client_size_growths + self.margin_restarts
    }

    /// Remembers a padding increase asked for by the child at `requester`.
    /// Returns `false` when that child already asked for the same quantized
    /// increase during this computation.
    pub fn remember_padding_increase(&mut self, requester: usize, increase: &Inset) -> bool {
        self.padding_history
            .insert((requester, increase.quantized(self.precision)))
    }

    pub fn diagnostics(&self, disaster_recovery: bool) -> LayoutDiagnostics {
        LayoutDiagnostics {
            margin_iterations: self.margin_iterations,
            padding_iterations: self.padding_iterations,
            client_size_growths: self.client_size_growths,
            margin_restarts: self.margin_restarts,
            changes: self.changes,
            disaster_recovery,
        }
    }
}
