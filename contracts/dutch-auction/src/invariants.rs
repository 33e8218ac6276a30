// ============================================================================
// INVARIANTS - properties every placement and epoch transition must keep.
// Checked in debug builds after each rebalance and exercised by the tests.
// ============================================================================

use launch_types::SlugPosition;
use soroban_sdk::Vec;

/// Invariant: every slug is a well-formed, aligned range
///
/// Property:
///   tick_lower <= tick_upper, both multiples of tick_spacing
pub fn slugs_aligned(positions: &Vec<SlugPosition>, tick_spacing: i32) -> bool {
    positions.iter().all(|slug| {
        slug.tick_lower <= slug.tick_upper
            && slug.tick_lower.rem_euclid(tick_spacing) == 0
            && slug.tick_upper.rem_euclid(tick_spacing) == 0
    })
}

/// Invariant: consecutive slugs share their boundary
///
/// Property:
///   slug[i].tick_upper == slug[i + 1].tick_lower
pub fn slugs_contiguous(positions: &Vec<SlugPosition>) -> bool {
    let mut previous: Option<SlugPosition> = None;
    for slug in positions.iter() {
        if let Some(previous) = previous {
            if previous.tick_upper != slug.tick_lower {
                return false;
            }
        }
        previous = Some(slug);
    }
    true
}

/// Invariant: accumulator drift per transition is bounded
///
/// Property:
///   |next - previous| <= max_delta_per_epoch * epochs_passed
pub fn drift_bounded(previous: i128, next: i128, max_delta_per_epoch: i128, epochs_passed: u64) -> bool {
    let bound = max_delta_per_epoch.saturating_mul(epochs_passed as i128);
    (next - previous).abs() <= bound
}

/// Invariant: net flow never leaves the auction short
///
/// Property:
///   total_tokens_sold >= 0 && total_proceeds >= 0
pub fn net_flow_non_negative(total_tokens_sold: i128, total_proceeds: i128) -> bool {
    total_tokens_sold >= 0 && total_proceeds >= 0
}
