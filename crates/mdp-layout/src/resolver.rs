// ABOUTME: Constraint resolution for stored pane widths.
// ABOUTME: Repairs widths that no longer fit after the viewport or a divider moves.

use crate::store::PaneWidthStore;
use crate::viewport::ExpandLevel;

/// Bounds in force for the current viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_pane_width: f32,
    pub min_combined_pane_width: f32,
    pub max_width: f32,
    pub level: ExpandLevel,
}

impl Constraints {
    /// Largest editor width that still leaves a floor for every pane after it
    pub fn max_pane_a(&self) -> f32 {
        self.max_width - self.level.floors_after_editor() * self.min_pane_width
    }

    /// Largest editor+set width that still leaves a floor for the preview
    pub fn max_pane_ab(&self) -> f32 {
        self.max_width - self.min_pane_width
    }
}

/// Clamp that tolerates `lo > hi` (the upper bound wins).
pub fn clamp_width(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Which repair rules fired during a pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repairs {
    pub pane_ab_capped: bool,
    pub pane_a_capped: bool,
    pub pane_a_raised: bool,
    pub pane_ab_widened: bool,
}

impl Repairs {
    pub fn any(&self) -> bool {
        self.pane_ab_capped || self.pane_a_capped || self.pane_a_raised || self.pane_ab_widened
    }
}

/// Run the repair pass. Idempotent; a valid store is left untouched.
///
/// At [`ExpandLevel::Single`] the view is collapsed to one full-width pane and
/// no rule applies.
pub fn resolve(store: &mut PaneWidthStore, constraints: &Constraints) -> Repairs {
    let mut repairs = Repairs::default();
    if constraints.level == ExpandLevel::Single {
        return repairs;
    }

    if constraints.max_width < constraints.min_pane_width + store.pane_ab() {
        store.set_pane_ab_width(constraints.max_pane_ab());
        repairs.pane_ab_capped = true;
    }

    let reserved = constraints.level.floors_after_editor() * constraints.min_pane_width;
    if constraints.max_width < reserved + store.pane_a() {
        store.set_pane_a_width(constraints.max_pane_a());
        repairs.pane_a_capped = true;
    }

    // Coming back from a single collapsed pane can leave the editor under its floor.
    if store.pane_a() < constraints.min_pane_width {
        store.set_pane_a_width(constraints.min_pane_width);
        repairs.pane_a_raised = true;
    }

    // Widening from fewer panes can leave the set pane under its floor.
    if constraints.level == ExpandLevel::Triple
        && store.pane_ab() < store.pane_a() + constraints.min_pane_width
    {
        store.set_pane_ab_width(store.pane_a() + constraints.min_pane_width);
        repairs.pane_ab_widened = true;
    }

    if repairs.any() {
        tracing::debug!(
            pane_a = store.pane_a(),
            pane_ab = store.pane_ab(),
            ?repairs,
            "Repaired pane widths"
        );
    }
    repairs
}
