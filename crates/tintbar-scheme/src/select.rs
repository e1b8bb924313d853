#![forbid(unsafe_code)]

//! The sequential role selector.
//!
//! Each UI role is chosen in a fixed order from a shrinking candidate
//! pool. For one role the policy is: score every candidate with the
//! role's weighted cost model, prefer the cheapest candidate satisfying
//! the strict bounds, fall back to the cheapest satisfying the loose
//! (`*_close`) bounds, and as a last resort return the tracked fallback
//! (which starts at the first candidate), so a role is never left
//! unassigned.
//!
//! # Invariants
//!
//! 1. `select_role` always returns a valid index into its candidate
//!    slice.
//! 2. The loose tier stops accumulating once any strict candidate has
//!    been seen; a later loose candidate can never displace an earlier
//!    strict one.
//! 3. Scoring is pure: equal inputs produce the same pick.

use tracing::debug;

use tintbar_color::{Rgb, contrast_ratio, delta_e_2000};

use crate::palette::Candidate;
use crate::profile::{PairBounds, RoleTargets, ScoreWeights};

/// Radius (ΔE00) under which a candidate is considered too close to an
/// already-chosen role and starts accruing the proximity penalty.
const PROXIMITY_RADIUS: f64 = 40.0;

/// Everything the selector needs to know about one role.
pub(crate) struct RoleSpec<'a> {
    /// Role name, for trace events.
    pub name: &'static str,
    pub targets: &'a RoleTargets,
    pub weights: &'a ScoreWeights,
    /// Inter-role windows, applied against every already-chosen color.
    /// `None` for the accent, which has nothing to collide with yet.
    pub pair: Option<&'a PairBounds>,
    /// Colors already assigned to earlier roles, in selection order.
    pub chosen: &'a [Rgb],
}

/// Which tier produced the pick, for trace events and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    Strict,
    Close,
    Fallback,
}

/// Cost of one candidate for one role; lower is better.
///
/// `-k1·weight + k2·|s − s*| + k3·|l − l*| + k4·proximity + k5·|C* − C|`
/// with the proximity term measured against the nearest already-chosen
/// color and the contrast term against the most recently chosen one.
pub(crate) fn role_cost(candidate: &Candidate, spec: &RoleSpec<'_>) -> f64 {
    let t = spec.targets;
    let w = spec.weights;
    let mut cost = -w.prominence * candidate.weight
        + w.sat_dev * (candidate.hsl.s - t.sat_target).abs()
        + w.light_dev * (candidate.hsl.l - t.light_target).abs();

    if let Some(nearest) = nearest_chosen_distance(candidate.color, spec.chosen) {
        if nearest < PROXIMITY_RADIUS {
            cost += w.proximity * (PROXIMITY_RADIUS - nearest) / PROXIMITY_RADIUS;
        }
    }
    if let (Some(pair), Some(&anchor)) = (spec.pair, spec.chosen.last()) {
        cost += w.contrast_dev * (pair.contrast_target - contrast_ratio(candidate.color, anchor)).abs();
    }
    cost
}

fn nearest_chosen_distance(color: Rgb, chosen: &[Rgb]) -> Option<f64> {
    chosen
        .iter()
        .map(|&other| delta_e_2000(color, other))
        .min_by(|a, b| a.total_cmp(b))
}

/// Strict-tier eligibility: every bound at once.
fn passes_strict(candidate: &Candidate, spec: &RoleSpec<'_>) -> bool {
    let t = spec.targets;
    if candidate.hsl.l < t.light_low || candidate.hsl.l > t.light_high {
        return false;
    }
    if candidate.hsl.s > t.sat_high {
        return false;
    }
    if candidate.weight < t.prom_low {
        return false;
    }
    if let Some(pair) = spec.pair {
        for &other in spec.chosen {
            let d = delta_e_2000(candidate.color, other);
            if d < pair.delta_low || d > pair.delta_high {
                return false;
            }
            let c = contrast_ratio(candidate.color, other);
            if c < pair.contrast_low || c > pair.contrast_high {
                return false;
            }
        }
    }
    true
}

/// Loose-tier eligibility: the `*_close` bounds only. Inter-role
/// windows are strict-tier constraints, so a depleted or degenerate
/// pool still yields a candidate here.
fn passes_close(candidate: &Candidate, spec: &RoleSpec<'_>) -> bool {
    let t = spec.targets;
    candidate.hsl.l >= t.light_low_close
        && candidate.hsl.l <= t.light_high_close
        && candidate.hsl.s <= t.sat_high_close
        && candidate.weight >= t.prom_low_close
}

/// Pick one candidate for a role. Returns the index into `candidates`.
pub(crate) fn select_role(candidates: &[Candidate], spec: &RoleSpec<'_>) -> usize {
    debug_assert!(!candidates.is_empty(), "selector needs at least one candidate");

    let mut best: Option<(usize, f64)> = None;
    // Fallback defaults to the first candidate so a pick always exists.
    let mut closest: (usize, f64) = (0, f64::INFINITY);
    let mut closest_qualified = false;

    for (index, candidate) in candidates.iter().enumerate() {
        let cost = role_cost(candidate, spec);
        if passes_strict(candidate, spec) {
            if best.is_none_or(|(_, b)| cost < b) {
                best = Some((index, cost));
            }
        } else if best.is_none() && passes_close(candidate, spec) && cost < closest.1 {
            closest = (index, cost);
            closest_qualified = true;
        }
    }

    let (index, tier) = match best {
        Some((index, _)) => (index, Tier::Strict),
        None if closest_qualified => (closest.0, Tier::Close),
        None => (closest.0, Tier::Fallback),
    };
    debug!(role = spec.name, index, ?tier, "role selected");
    index
}
