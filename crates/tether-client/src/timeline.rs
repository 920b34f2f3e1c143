//! Step timeline reconciliation and display-status derivation.
//!
//! The timeline is an insertion-ordered, deduplicated list keyed by step id.
//! Updates for a known id merge in place (preserving position); an unknown
//! id appends. Entries are never removed or reordered.

use tether_protocol::{Step, StepStatus, StepUpdate};

/// Merge an incoming step record into the timeline.
pub fn reconcile(steps: &mut Vec<Step>, update: StepUpdate) {
    if let Some(existing) = steps.iter_mut().find(|s| s.id == update.id) {
        update.apply_to(existing);
    } else {
        steps.push(update.into_step());
    }
}

/// Display statuses for the whole timeline, in order.
///
/// The agent only ever reports one step running at a time; a non-last entry
/// still marked `running` is a stale signal superseded by later progress and
/// resolves to `complete`. The last entry shows its raw status.
///
/// Pure and idempotent; recomputed on every read, never cached.
#[must_use]
pub fn display_statuses(steps: &[Step]) -> Vec<StepStatus> {
    let last = steps.len().saturating_sub(1);
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            if step.status == StepStatus::Running && index != last {
                StepStatus::Complete
            } else {
                step.status
            }
        })
        .collect()
}
