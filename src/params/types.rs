use serde::{Deserialize, Serialize};

/// Self-exciting hazard model parameters.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `baseline` | Background intensity (events per unit time). |
/// | `excitation_weight` | Weight of the decayed excitation sum. |
/// | `decay` | Exponential decay rate applied to past event ages. |
/// | `bumps` | Constant intensity bump added on top. |
/// | `past_event_times` | Ages of past events, in the same time unit. |
/// | `horizon` | Window over which the hazard probability is evaluated. |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardParams {
    pub baseline: f64,
    pub excitation_weight: f64,
    pub decay: f64,
    pub bumps: f64,
    pub past_event_times: Vec<f64>,
    pub horizon: f64,
}

/// Per-channel loss weights and capacities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelParams {
    /// Loss weight per channel; slopes are `-hazard * weight`.
    pub loss_weights: Vec<f64>,
    /// Capacity `umax` per channel.
    pub capacities: Vec<f64>,
}

impl ChannelParams {
    /// Number of channels.
    pub fn len(&self) -> usize {
        self.loss_weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss_weights.is_empty()
    }
}

/// Integer rows and prime moduli used for residue reduction.
///
/// Row `j` is paired with `primes[j]`; every row spans the full quantized
/// state (hazard followed by one entry per channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueParams {
    pub rows: Vec<Vec<i64>>,
    pub primes: Vec<u64>,
}
