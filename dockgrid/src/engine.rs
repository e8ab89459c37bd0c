//! The docking grid layout engine.
//!
//! Side children occupy the border cells of a 3x3 grid, fill children the
//! center cell, and the corners stay empty. A layout runs in two phases:
//!
//! 1. Margins: side children are laid out against the remaining fill size
//!    until their thicknesses stop changing.
//! 2. Paddings: all children are laid out with their final boxes until the
//!    shared paddings stop growing.
//!
//! A child that needs more room than it was offered grows the client size
//! and both phases start over, as they do when a side child changes its
//! thickness while paddings are negotiated. Every loop is capped, and a padding request
//! that keeps coming back switches the engine into disaster recovery: one
//! last pass in which no change is accepted.

use dockgrid_common::{Alignment, Inset, Position, Rect, Side, Size};
use tracing::{debug, trace, warn};

use crate::child::{ChildConstraints, DockChild};
use crate::convergence::{ConvergenceTracker, LayoutChanges, LayoutDiagnostics};
use crate::error::DockLayoutError;
use crate::options::{LayoutConstraints, LayoutOptions};

/// Outcome of a layout computation
#[derive(Debug, Clone, PartialEq)]
pub struct DockLayoutResult {
    /// Client size, larger than requested when children needed more room
    pub client_size: Size,
    /// Space claimed on each side by the stacked side children
    pub margins: Inset,
    /// Paddings shared by every child
    pub paddings: Inset,
    /// Size of the center cell
    pub fill_size: Size,
    /// Padding the container itself needs from its parent for overflow its
    /// empty corners could not absorb
    pub requested_own_padding: Option<Inset>,
    pub diagnostics: LayoutDiagnostics,
}

impl DockLayoutResult {
    /// Bounds of the center cell within the client box
    pub fn fill_bounds(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.fill_size.width,
            self.fill_size.height,
        )
    }

    /// Bounds of a child positioned by the engine
    pub fn child_bounds(&self, position: &Position, size: Size) -> Rect {
        position.resolve(size, self.client_size)
    }
}

#[derive(Debug, Clone, Copy)]
struct SideSlot {
    index: usize,
    side: Side,
    thickness: Option<f32>,
    offset: f32,
    visible: bool,
}

impl SideSlot {
    fn new(index: usize, side: Side) -> Self {
        Self {
            index,
            side,
            thickness: None,
            offset: 0.0,
            visible: true,
        }
    }
}

enum PhaseOutcome {
    Settled,
    ClientSizeChanged,
    MarginsChanged,
}

/// State private to one `compute_layout` call
struct LayoutState {
    client_size: Size,
    margins: Inset,
    paddings: Inset,
    fill_size: Size,
    fill_size_minimum: Option<Size>,
    can_change: bool,
    requested_own_padding: Option<Inset>,
    disaster_recovery: bool,
    tracker: ConvergenceTracker,
}

impl LayoutState {
    fn new(client_size: Size, constraints: &LayoutConstraints, options: &LayoutOptions) -> Self {
        Self {
            client_size,
            margins: Inset::ZERO,
            paddings: Inset::ZERO,
            fill_size: client_size,
            fill_size_minimum: constraints.fill_size_minimum,
            can_change: constraints.can_change,
            requested_own_padding: None,
            disaster_recovery: false,
            tracker: ConvergenceTracker::new(options.padding_key_precision),
        }
    }

    fn can_change(&self, iteration: usize, max_iterations: usize) -> bool {
        self.can_change && !self.disaster_recovery && iteration < max_iterations
    }

    /// Whether the client may still grow or the margins be re-run
    fn can_restart(&self, max_restarts: usize) -> bool {
        self.tracker.restarts() < max_restarts
    }

    /// Rebuilds margins and fill size from the thicknesses settled so far
    fn reset_margins(&mut self, slots: &[SideSlot]) {
        self.margins = Inset::ZERO;
        for slot in slots {
            if let Some(thickness) = slot.thickness {
                self.margins
                    .set(slot.side, self.margins.get(slot.side) + thickness);
            }
        }
        self.update_fill_size();
    }

    fn claim(&mut self, side: Side, thickness: f32) {
        self.margins.set(side, self.margins.get(side) + thickness);
        self.update_fill_size();
    }

    fn release(&mut self, side: Side, thickness: f32) {
        self.margins
            .set(side, (self.margins.get(side) - thickness).max(0.0));
        self.update_fill_size();
    }

    fn update_fill_size(&mut self) {
        self.fill_size = self.client_size.shrink(&self.margins);
    }

    /// Size offered to side children while margins settle
    fn available_for_sides(&self) -> Size {
        match self.fill_size_minimum {
            Some(minimum) => self.fill_size.max(minimum),
            None => self.fill_size,
        }
    }

    fn grow_client(&mut self, growth: Size) {
        self.client_size = Size::new(
            self.client_size.width + growth.width,
            self.client_size.height + growth.height,
        );
        self.tracker.record_growth();
        self.update_fill_size();
    }

    fn into_result(self) -> DockLayoutResult {
        DockLayoutResult {
            client_size: self.client_size,
            margins: self.margins,
            paddings: self.paddings,
            fill_size: self.fill_size,
            requested_own_padding: self.requested_own_padding,
            diagnostics: self.tracker.diagnostics(self.disaster_recovery),
        }
    }
}

/// Lays out the children of a docking container
#[derive(Debug, Clone, Default)]
pub struct DockLayout {
    options: LayoutOptions,
}

impl DockLayout {
    pub fn new(options: LayoutOptions) -> Result<Self, DockLayoutError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Computes margins, paddings and fill size for `children` in a client
    /// box of `client_size`, and positions every visible child.
    ///
    /// Children without an anchor are left alone. Side children are stacked
    /// in slice order, fill children are laid out after all side children.
    #[tracing::instrument(skip_all, fields(width = client_size.width, height = client_size.height))]
    pub fn compute_layout<C: DockChild>(
        &self,
        children: &mut [C],
        client_size: Size,
        constraints: &LayoutConstraints,
    ) -> Result<DockLayoutResult, DockLayoutError> {
        if !client_size.is_valid() {
            return Err(DockLayoutError::InvalidClientSize {
                width: client_size.width,
                height: client_size.height,
            });
        }
        if let Some(minimum) = constraints.fill_size_minimum {
            if !minimum.is_valid() {
                return Err(DockLayoutError::InvalidFillMinimum {
                    width: minimum.width,
                    height: minimum.height,
                });
            }
        }

        let (mut slots, fill_indices) = classify(children);
        let mut state = LayoutState::new(client_size, constraints, &self.options);

        loop {
            self.settle_margins(children, &mut slots, &mut state);
            match self.settle_paddings(children, &slots, &fill_indices, &mut state) {
                PhaseOutcome::Settled => break,
                PhaseOutcome::ClientSizeChanged => {
                    debug!(client_size = ?state.client_size, "client size grew, restarting layout");
                }
                PhaseOutcome::MarginsChanged => {
                    debug!("side child thickness changed, re-running margins");
                }
            }
        }

        self.position_side_children(children, &slots, &state);

        let result = state.into_result();
        debug!(
            margins = ?result.margins,
            paddings = ?result.paddings,
            fill_size = ?result.fill_size,
            diagnostics = ?result.diagnostics,
            "layout computed"
        );
        Ok(result)
    }

    /// Phase 1: settle the thickness of every side child.
    ///
    /// A thickness only counts as changed against the one of an earlier
    /// pass, so the first pass of a run never asks for another one. A side
    /// child laid out before a sibling that shrinks its length is therefore
    /// not measured again here; the paddings phase hands it its final box.
    fn settle_margins<C: DockChild>(
        &self,
        children: &mut [C],
        slots: &mut [SideSlot],
        state: &mut LayoutState,
    ) {
        let max_iterations = self.options.max_margin_iterations;
        state.reset_margins(slots);

        let mut iteration = 0;
        loop {
            iteration += 1;
            state.tracker.start_margin_iteration();
            let can_change = state.can_change(iteration, max_iterations);
            let changes = self.layout_side_children(children, slots, state, can_change);
            state.tracker.record(changes);
            trace!(phase = "margins", iteration, ?changes, "pass complete");

            if changes.contains(LayoutChanges::OWN_CLIENT_SIZE_CHANGED) {
                state.reset_margins(slots);
            }
            if !changes.requires_relayout() {
                break;
            }
            if iteration >= max_iterations {
                warn!(iteration, ?changes, "margins did not settle, keeping last pass");
                break;
            }
        }

        let mut offsets = Inset::ZERO;
        for slot in slots.iter_mut().filter(|slot| slot.visible) {
            slot.offset = offsets.get(slot.side);
            offsets.set(slot.side, slot.offset + slot.thickness.unwrap_or(0.0));
        }
    }

    /// One margins pass. Returns early when the client size had to grow.
    fn layout_side_children<C: DockChild>(
        &self,
        children: &mut [C],
        slots: &mut [SideSlot],
        state: &mut LayoutState,
        can_change: bool,
    ) -> LayoutChanges {
        let epsilon = self.options.margin_epsilon;
        let mut changes = LayoutChanges::empty();

        for slot in slots.iter_mut() {
            if let Some(previous) = slot.thickness {
                state.release(slot.side, previous);
            }

            let parallel = slot.side.parallel_axis();
            let orthogonal = slot.side.orthogonal_axis();
            let available = state.available_for_sides();
            let child = &mut children[slot.index];
            child.layout(
                available,
                &ChildConstraints {
                    paddings: state.paddings.only(parallel.sides()),
                    size_reference: state.client_size,
                    can_change,
                },
            );
            slot.visible = child.is_visible();

            let mut thickness = 0.0;
            if slot.visible {
                let resolved = child.resolved_size();
                let remaining = state.fill_size.get(orthogonal);
                let fits_in = available.with(orthogonal, remaining);
                if let Some(excess) = resolved.excess_over(&fits_in, epsilon) {
                    if can_change && state.can_restart(self.options.max_margin_iterations) {
                        debug!(side = %slot.side, ?excess, "side child needs more room");
                        state.grow_client(excess);
                        return changes | LayoutChanges::OWN_CLIENT_SIZE_CHANGED;
                    }
                    warn!(side = %slot.side, ?excess, "side child does not fit, clamping");
                }
                thickness = resolved.get(orthogonal).max(0.0).min(remaining);
            }

            match slot.thickness {
                Some(previous) if (thickness - previous).abs() <= epsilon => {
                    thickness = previous;
                }
                Some(previous) if slot.visible && !can_change => {
                    warn!(
                        side = %slot.side,
                        previous,
                        requested = thickness,
                        "thickness change ignored on final margins pass"
                    );
                    thickness = previous.min(state.fill_size.get(orthogonal));
                }
                Some(_) => changes |= LayoutChanges::MARGINS_CHANGED,
                None => {}
            }

            slot.thickness = Some(thickness);
            state.claim(slot.side, thickness);
        }

        changes
    }

    /// Phase 2: settle the shared paddings and the overflow request
    fn settle_paddings<C: DockChild>(
        &self,
        children: &mut [C],
        slots: &[SideSlot],
        fill_indices: &[usize],
        state: &mut LayoutState,
    ) -> PhaseOutcome {
        let max_iterations = self.options.max_padding_iterations;

        let mut iteration = 0;
        loop {
            iteration += 1;
            state.tracker.start_padding_iteration();
            let recovering = state.disaster_recovery;
            let can_change = state.can_change(iteration, max_iterations);
            let changes =
                self.layout_all_children(children, slots, fill_indices, state, can_change);
            state.tracker.record(changes);
            trace!(phase = "paddings", iteration, ?changes, "pass complete");

            if changes.contains(LayoutChanges::OWN_CLIENT_SIZE_CHANGED) {
                return PhaseOutcome::ClientSizeChanged;
            }
            if changes.contains(LayoutChanges::MARGINS_CHANGED) {
                return PhaseOutcome::MarginsChanged;
            }
            if recovering {
                return PhaseOutcome::Settled;
            }
            if changes.contains(LayoutChanges::LOOP_DETECTED) {
                warn!(
                    iteration,
                    paddings = ?state.paddings,
                    "padding negotiation is looping, running one fixed pass"
                );
                state.disaster_recovery = true;
                continue;
            }
            if !changes.requires_relayout() {
                return PhaseOutcome::Settled;
            }
            if iteration >= max_iterations {
                warn!(iteration, ?changes, "paddings did not settle, keeping last pass");
                return PhaseOutcome::Settled;
            }
        }
    }

    /// One paddings pass over side children, then fill children
    fn layout_all_children<C: DockChild>(
        &self,
        children: &mut [C],
        slots: &[SideSlot],
        fill_indices: &[usize],
        state: &mut LayoutState,
        can_change: bool,
    ) -> LayoutChanges {
        let epsilon = self.options.margin_epsilon;
        let can_restart = can_change && state.can_restart(self.options.max_margin_iterations);
        let mut changes = LayoutChanges::empty();
        let mut overflow = Inset::ZERO;

        for slot in slots.iter().filter(|slot| slot.visible) {
            let parallel = slot.side.parallel_axis();
            let orthogonal = slot.side.orthogonal_axis();
            let thickness = slot.thickness.unwrap_or(0.0);
            let available = Size::ZERO
                .with(parallel, state.fill_size.get(parallel))
                .with(orthogonal, thickness);
            let child = &mut children[slot.index];
            child.layout(
                available,
                &ChildConstraints {
                    paddings: state.paddings.only(parallel.sides()),
                    size_reference: state.client_size,
                    can_change,
                },
            );
            if !child.is_visible() {
                continue;
            }

            // Only the length along the shared axis can press on the client
            let resolved = child.resolved_size();
            let excess = resolved.get(parallel) - available.get(parallel);
            if excess > epsilon {
                if can_restart {
                    debug!(side = %slot.side, excess, "side child outgrew its box");
                    state.grow_client(Size::ZERO.with(parallel, excess));
                    return changes | LayoutChanges::OWN_CLIENT_SIZE_CHANGED;
                }
                warn!(side = %slot.side, excess, "side child outgrew its box, ignoring");
            }

            if (resolved.get(orthogonal) - thickness).abs() > epsilon {
                if can_restart {
                    debug!(
                        side = %slot.side,
                        thickness,
                        requested = resolved.get(orthogonal),
                        "side child changed its thickness"
                    );
                    state.tracker.record_margin_restart();
                    return changes | LayoutChanges::MARGINS_CHANGED;
                }
                warn!(
                    side = %slot.side,
                    thickness,
                    requested = resolved.get(orthogonal),
                    "side child changed its thickness after margins settled, ignoring"
                );
            }

            changes |=
                self.negotiate_paddings(slot.index, child.requested_paddings(), state, can_change);
            if changes.contains(LayoutChanges::LOOP_DETECTED) {
                return changes;
            }

            if let Some(requested) = child.requested_optional_overflow() {
                let remainder =
                    unabsorbed_overflow(slot.side, &requested.clamped(), &state.margins);
                overflow = overflow.max(remainder);
            }
        }

        if changes.contains(LayoutChanges::NORMAL_PADDINGS_CHANGED) {
            return changes;
        }

        let mut pending_growth: Option<Size> = None;
        for &index in fill_indices {
            let available = state.fill_size;
            let child = &mut children[index];
            child.layout(
                available,
                &ChildConstraints {
                    paddings: state.paddings,
                    size_reference: state.client_size,
                    can_change,
                },
            );
            if !child.is_visible() {
                continue;
            }

            let resolved = child.resolved_size();
            if let Some(excess) = resolved.excess_over(&available, epsilon) {
                if can_restart {
                    pending_growth =
                        Some(pending_growth.map_or(excess, |growth| growth.max(excess)));
                    continue;
                }
                warn!(?excess, "fill child outgrew the fill area, ignoring");
            }

            let padding_changes =
                self.negotiate_paddings(index, child.requested_paddings(), state, can_change);
            changes |= padding_changes;
            if padding_changes.contains(LayoutChanges::LOOP_DETECTED) {
                return changes;
            }
            if pending_growth.is_none() {
                if padding_changes.contains(LayoutChanges::NORMAL_PADDINGS_CHANGED) {
                    return changes;
                }
                child.set_position(center_in_fill(resolved, state));
            }
        }

        if let Some(growth) = pending_growth {
            debug!(?growth, "fill children outgrew the fill area");
            state.grow_client(growth);
            return changes | LayoutChanges::OWN_CLIENT_SIZE_CHANGED;
        }

        changes | self.record_overflow(overflow, state)
    }

    /// Grants the sides of `requested` that exceed the current paddings by
    /// more than the stability threshold. `requester` is the index of the
    /// asking child.
    fn negotiate_paddings(
        &self,
        requester: usize,
        requested: Option<Inset>,
        state: &mut LayoutState,
        can_change: bool,
    ) -> LayoutChanges {
        let Some(requested) = requested else {
            return LayoutChanges::empty();
        };
        let requested = requested.clamped();

        let mut increase = Inset::ZERO;
        for side in Side::ALL {
            let current = state.paddings.get(side);
            let delta = requested.get(side) - current;
            if delta > 0.0 && delta >= self.options.padding_change_threshold(current) {
                increase.set(side, delta);
            }
        }
        if increase.is_zero() {
            return LayoutChanges::empty();
        }

        if !can_change {
            warn!(
                ?requested,
                paddings = ?state.paddings,
                "padding increase requested after changes were frozen, ignoring"
            );
            return LayoutChanges::empty();
        }
        if !state.tracker.remember_padding_increase(requester, &increase) {
            warn!(requester, ?increase, "same padding increase requested again");
            return LayoutChanges::LOOP_DETECTED;
        }

        state.paddings = state.paddings + increase;
        debug!(paddings = ?state.paddings, "shared paddings grew");
        LayoutChanges::NORMAL_PADDINGS_CHANGED
    }

    /// Stores the own padding request of a completed pass
    fn record_overflow(&self, overflow: Inset, state: &mut LayoutState) -> LayoutChanges {
        let request = (!overflow.is_zero()).then_some(overflow);
        let changed = match (&state.requested_own_padding, &request) {
            (Some(previous), Some(next)) => !previous.approx_eq(next, self.options.margin_epsilon),
            (None, None) => false,
            _ => true,
        };
        state.requested_own_padding = request;

        if changed {
            debug!(?request, "own padding request changed");
            LayoutChanges::OVERFLOW_PADDINGS_CHANGED
        } else {
            LayoutChanges::empty()
        }
    }

    fn position_side_children<C: DockChild>(
        &self,
        children: &mut [C],
        slots: &[SideSlot],
        state: &LayoutState,
    ) {
        for slot in slots.iter().filter(|slot| slot.visible) {
            let child = &mut children[slot.index];
            if !child.is_visible() {
                continue;
            }

            let parallel = slot.side.parallel_axis();
            let start = parallel.start_side();
            let size = child.resolved_size();
            let mut position = Position::default().with(slot.side, slot.offset);
            match child.alignment() {
                Alignment::Start | Alignment::Fill => {
                    position.set(start, state.margins.get(start));
                }
                Alignment::End => {
                    let end = start.opposite();
                    position.set(end, state.margins.get(end));
                }
                Alignment::Center => {
                    let free = state.fill_size.get(parallel) - size.get(parallel);
                    position.set(start, state.margins.get(start) + free / 2.0);
                }
            }
            child.set_position(position);
        }
    }
}

/// Splits anchored children into side slots and fill indices, keeping order
fn classify<C: DockChild>(children: &[C]) -> (Vec<SideSlot>, Vec<usize>) {
    let mut slots = Vec::new();
    let mut fill_indices = Vec::new();
    for (index, child) in children.iter().enumerate() {
        let Some(anchor) = child.anchor() else {
            continue;
        };
        match anchor.side() {
            Some(side) => slots.push(SideSlot::new(index, side)),
            None => fill_indices.push(index),
        }
    }
    (slots, fill_indices)
}

/// Overflow of a side child left after the corner cells on either end of
/// it take their share. A corner is as large as the margin on its side.
fn unabsorbed_overflow(side: Side, overflow: &Inset, margins: &Inset) -> Inset {
    side.parallel_axis()
        .sides()
        .into_iter()
        .fold(Inset::ZERO, |remainder, corner| {
            let excess = (overflow.get(corner) - margins.get(corner)).max(0.0);
            remainder.with(corner, excess)
        })
}

fn center_in_fill(size: Size, state: &LayoutState) -> Position {
    Position::default()
        .with(
            Side::Left,
            state.margins.left + (state.fill_size.width - size.width) / 2.0,
        )
        .with(
            Side::Top,
            state.margins.top + (state.fill_size.height - size.height) / 2.0,
        )
}
