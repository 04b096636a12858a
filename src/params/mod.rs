#![forbid(unsafe_code)]

//! Explicit configuration for a pipeline run.
//!
//! Every constant of the demo (hazard inputs, channel table, budget,
//! tolerance, quantization step, residue rows, primes, leaf metadata and hash
//! family) is a named field of [`PipelineParams`]. Instances are produced by
//! [`PipelineParamsBuilder::build`], which runs the validation below before
//! anything is computed.
//!
//! # Invariants
//!
//! * Loss weights and capacities have the same, non-zero length.
//! * Capacities, budget, hazard rates, decay, horizon and event ages are
//!   finite and non-negative; `epsilon` and `quant_step` are positive.
//! * Residue rows, primes and metadata pair up one-to-one, and every row spans
//!   the quantized state (`1 + channels` entries).
//! * Every modulus is prime.

mod builder;
mod pipeline_params;
mod types;
mod validate;

pub use builder::{BuiltinProfile, PipelineParamsBuilder};
pub use pipeline_params::PipelineParams;
pub use types::{ChannelParams, HazardParams, ResidueParams};
pub use validate::ParamsError;
