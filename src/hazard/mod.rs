//! Self-exciting hazard model.
//!
//! The event intensity is a baseline plus an exponentially decaying
//! contribution from each past event, plus a constant bump term:
//!
//! ```text
//! excitation = Σ exp(-decay * t_k)
//! intensity  = baseline + excitation_weight * excitation + bumps
//! hazard     = 1 - exp(-intensity * horizon)
//! ```
//!
//! `hazard` is the probability of at least one event within the horizon.
//! Channel loss slopes are `-hazard * loss_weight`, so a higher hazard pushes
//! more budget towards heavily weighted channels.

use tracing::debug;

use crate::params::HazardParams;

/// Evaluated hazard state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardEstimate {
    pub excitation: f64,
    pub intensity: f64,
    /// Probability of at least one event over the horizon, in `[0, 1]`.
    pub probability: f64,
}

/// Sum of exponentially decayed contributions of past events.
pub fn excitation(past_event_times: &[f64], decay: f64) -> f64 {
    past_event_times.iter().map(|t| (-decay * t).exp()).sum()
}

/// Event intensity for a given excitation level.
pub fn intensity(baseline: f64, excitation_weight: f64, excitation: f64, bumps: f64) -> f64 {
    baseline + excitation_weight * excitation + bumps
}

/// Probability of at least one event within `horizon` at constant `intensity`.
pub fn hazard_probability(intensity: f64, horizon: f64) -> f64 {
    1.0 - (-intensity * horizon).exp()
}

/// Linear loss slope per channel: `-hazard * weight`.
pub fn loss_slopes(hazard: f64, loss_weights: &[f64]) -> Vec<f64> {
    loss_weights.iter().map(|weight| -hazard * weight).collect()
}

/// Evaluates the full hazard chain for validated parameters.
pub fn estimate(params: &HazardParams) -> HazardEstimate {
    let excitation = excitation(&params.past_event_times, params.decay);
    let intensity = intensity(
        params.baseline,
        params.excitation_weight,
        excitation,
        params.bumps,
    );
    let probability = hazard_probability(intensity, params.horizon);
    debug!(excitation, intensity, probability, "hazard estimated");
    HazardEstimate {
        excitation,
        intensity,
        probability,
    }
}
