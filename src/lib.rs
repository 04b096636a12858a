//! Core library entry point for the `sda-pipeline` demo.
//!
//! The crate composes four stages into a single report:
//!
//! 1. a self-exciting hazard model producing per-channel loss slopes,
//! 2. a bisection water-filling allocator distributing a control budget,
//! 3. quantization of the hazard/allocation state and modular residues,
//! 4. a binary Merkle commitment over residue/metadata leaves.
//!
//! None of this is production cryptography. The report carries a fixed
//! `"demo-only"` policy label to make that explicit.

pub mod allocator;
pub mod hash;
pub mod hazard;
pub mod merkle;
pub mod params;
pub mod pipeline;
pub mod quant;
pub mod report;

pub use allocator::{allocate, allocate_detailed, Allocation, AllocationError};
pub use merkle::{merkle_root, MerkleError, MerkleTree};
pub use params::{BuiltinProfile, ParamsError, PipelineParams, PipelineParamsBuilder};
pub use pipeline::{run, run_with_trace, PipelineTrace};
pub use quant::QuantError;
pub use report::{Report, POLICY_LABEL};

/// Result type used throughout the library to surface deterministic errors.
pub type PipelineResult<T> = core::result::Result<T, PipelineError>;

/// Error enumeration for the pipeline entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// Parameter validation rejected the configuration.
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),
    /// The allocator rejected its inputs.
    #[error("allocation failed: {0}")]
    Allocation(#[from] AllocationError),
    /// Quantization or residue reduction failed.
    #[error("quantization failed: {0}")]
    Quant(#[from] QuantError),
    /// Merkle path handling failed.
    #[error("merkle commitment failed: {0}")]
    Merkle(#[from] MerkleError),
    /// A parameter file could not be read.
    #[error("failed to read {}: {message}", .path.display())]
    Io {
        path: std::path::PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },
    /// Report serialisation failed.
    #[error("report serialisation failed: {0}")]
    Serialization(String),
}
