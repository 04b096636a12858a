use tracing::{debug, trace};

use super::errors::AllocationError;

/// Result of a water-filling solve.
///
/// `values[i]` is the allocation of channel `i`; it lies in `[0, capacities[i]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub values: Vec<f64>,
    /// Lagrange multiplier (water level offset) the allocation was clipped at.
    pub multiplier: f64,
    /// Final bracket `(lo, hi)` around the multiplier.
    pub bracket: (f64, f64),
    /// Number of bisection steps taken.
    pub iterations: u32,
}

impl Allocation {
    /// Sum of the allocation vector.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Consumes the record and returns the allocation vector.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Allocates `budget` across channels by water-filling.
///
/// Thin wrapper over [`allocate_detailed`] returning only the vector.
pub fn allocate(
    slopes: &[f64],
    capacities: &[f64],
    budget: f64,
    epsilon: f64,
) -> Result<Vec<f64>, AllocationError> {
    allocate_detailed(slopes, capacities, budget, epsilon).map(Allocation::into_values)
}

/// Allocates `budget` across channels by bisecting the Lagrange multiplier.
///
/// Each channel receives `clip(-slopes[i] - lambda, 0, capacities[i])`. The
/// bracket starts at `lo = min(-a - umax)` (every channel saturated) and
/// `hi = max(-a)` (every channel empty). A midpoint whose total exceeds the
/// budget raises `lo`, otherwise it lowers `hi`. The loop stops once the
/// bracket is no wider than `epsilon`, or once the midpoint can no longer
/// split it in floating point. Inputs whose bracket endpoints overflow to
/// infinity are rejected.
pub fn allocate_detailed(
    slopes: &[f64],
    capacities: &[f64],
    budget: f64,
    epsilon: f64,
) -> Result<Allocation, AllocationError> {
    check_inputs(slopes, capacities, budget, epsilon)?;

    let (mut lo, mut hi) = initial_bracket(slopes, capacities);
    if !lo.is_finite() || !hi.is_finite() {
        return Err(AllocationError::NonFinite { field: "bracket" });
    }
    if lo > hi {
        return Err(AllocationError::InvertedBracket { lo, hi });
    }

    let mut iterations = 0u32;
    while hi - lo > epsilon {
        let lam = midpoint(lo, hi);
        if lam <= lo || lam >= hi {
            break;
        }
        let total: f64 = clipped(slopes, capacities, lam).sum();
        if total > budget {
            lo = lam;
        } else {
            hi = lam;
        }
        iterations += 1;
        trace!(iterations, lam, total, "bisection step");
    }

    let multiplier = midpoint(lo, hi);
    let values: Vec<f64> = clipped(slopes, capacities, multiplier).collect();
    debug!(
        channels = values.len(),
        iterations,
        multiplier,
        budget,
        "water-filling converged"
    );
    Ok(Allocation {
        values,
        multiplier,
        bracket: (lo, hi),
        iterations,
    })
}

fn check_inputs(
    slopes: &[f64],
    capacities: &[f64],
    budget: f64,
    epsilon: f64,
) -> Result<(), AllocationError> {
    if slopes.len() != capacities.len() {
        return Err(AllocationError::LengthMismatch {
            slopes: slopes.len(),
            capacities: capacities.len(),
        });
    }
    if slopes.is_empty() {
        return Err(AllocationError::EmptyChannels);
    }
    if slopes.iter().any(|a| !a.is_finite()) {
        return Err(AllocationError::NonFinite { field: "slopes" });
    }
    if capacities.iter().any(|u| !u.is_finite()) {
        return Err(AllocationError::NonFinite {
            field: "capacities",
        });
    }
    if let Some((channel, &got)) = capacities.iter().enumerate().find(|(_, u)| **u < 0.0) {
        return Err(AllocationError::NegativeCapacity { channel, got });
    }
    if !budget.is_finite() {
        return Err(AllocationError::NonFinite { field: "budget" });
    }
    if budget < 0.0 {
        return Err(AllocationError::NegativeBudget { got: budget });
    }
    if epsilon.is_nan() || epsilon <= 0.0 {
        return Err(AllocationError::NonPositiveEpsilon { got: epsilon });
    }
    Ok(())
}

fn initial_bracket(slopes: &[f64], capacities: &[f64]) -> (f64, f64) {
    let lo = slopes
        .iter()
        .zip(capacities)
        .map(|(a, umax)| -a - umax)
        .fold(f64::INFINITY, f64::min);
    let hi = slopes.iter().map(|a| -a).fold(f64::NEG_INFINITY, f64::max);
    (lo, hi)
}

/// Halves each endpoint first so that `lo + hi` cannot overflow.
fn midpoint(lo: f64, hi: f64) -> f64 {
    0.5 * lo + 0.5 * hi
}

fn clipped<'a>(
    slopes: &'a [f64],
    capacities: &'a [f64],
    lam: f64,
) -> impl Iterator<Item = f64> + 'a {
    slopes
        .iter()
        .zip(capacities)
        .map(move |(a, umax)| (-a - lam).min(*umax).max(0.0))
}
