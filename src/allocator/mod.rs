//! Water-filling allocation of a control budget across channels.
//!
//! Channel `i` has a linear loss slope `a[i]` and a capacity `umax[i]`. The
//! allocator searches a single Lagrange multiplier `lambda` so that
//! `u[i] = clip(-a[i] - lambda, 0, umax[i])` spends at most the budget. The
//! search is a plain bisection; for a finite tolerance the returned total may
//! overshoot the budget by at most the final bracket width times the number of
//! unsaturated channels.
//!
//! # Invariants
//!
//! * `0 <= u[i] <= umax[i]` for every returned allocation.
//! * The output has the same length and index order as the inputs.
//! * Increasing the budget never decreases the total (up to `sum(umax)`).

mod errors;
mod water_filling;

pub use errors::AllocationError;
pub use water_filling::{allocate, allocate_detailed, Allocation};
