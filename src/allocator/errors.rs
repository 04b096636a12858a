//! Precondition failures surfaced by the allocator.
//!
//! Every variant is reported before any allocation is computed; there is no
//! partial result and no local recovery.

/// Invalid allocator input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    /// Slope and capacity vectors differ in length.
    #[error("slopes have {slopes} entries but capacities have {capacities}")]
    LengthMismatch { slopes: usize, capacities: usize },
    /// No channels were supplied, so no bracket exists.
    #[error("at least one channel is required")]
    EmptyChannels,
    /// A channel capacity was negative.
    #[error("capacity of channel {channel} is negative ({got})")]
    NegativeCapacity { channel: usize, got: f64 },
    /// The budget was negative.
    #[error("budget must be non-negative, got {got}")]
    NegativeBudget { got: f64 },
    /// The convergence tolerance was zero or negative.
    #[error("epsilon must be positive, got {got}")]
    NonPositiveEpsilon { got: f64 },
    /// An input was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    /// The multiplier bracket is inverted (`lo > hi`).
    #[error("multiplier bracket is inverted: lo = {lo}, hi = {hi}")]
    InvertedBracket { lo: f64, hi: f64 },
}
