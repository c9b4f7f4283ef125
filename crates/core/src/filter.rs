//! Customer hard-limit filtering.

use crate::domain::glass::{GlassRecord, ScoredGlass};
use crate::domain::request::CustomerRequest;

/// Minimum Rw rating considered adequate when the customer asks for
/// acoustic performance.
pub const ACOUSTIC_RW_FLOOR: f64 = 40.0;

/// Keep only records satisfying every present constraint.
///
/// Absent constraints impose nothing; present constraints are ANDed. The
/// result is always a subset of the input and may be empty.
pub fn apply_constraints(
    candidates: Vec<ScoredGlass>,
    request: &CustomerRequest,
    acoustic_rw_floor: f64,
) -> Vec<ScoredGlass> {
    candidates
        .into_iter()
        .filter(|candidate| satisfies(&candidate.record, request, acoustic_rw_floor))
        .collect()
}

/// Whether one record passes the customer's active constraints.
pub fn satisfies(record: &GlassRecord, request: &CustomerRequest, acoustic_rw_floor: f64) -> bool {
    if let Some(max_cost) = request.max_cost_per_sqm {
        if record.cost_per_sqm > max_cost {
            return false;
        }
    }
    if let Some(max_u_value) = request.required_u_value {
        if record.u_value > max_u_value {
            return false;
        }
    }
    if let Some(max_shgc) = request.required_shgc {
        if record.shgc > max_shgc {
            return false;
        }
    }
    if let Some(min_vlt) = request.required_vlt {
        if record.vlt < min_vlt {
            return false;
        }
    }
    if request.wants_acoustic() && record.acoustic_rw < acoustic_rw_floor {
        return false;
    }
    true
}
