//! Externally visible pipeline report.

use serde::{Deserialize, Serialize};

use crate::{PipelineError, PipelineResult};

/// Fixed label marking every report as non-production output.
pub const POLICY_LABEL: &str = "demo-only";

/// Single computed report of a pipeline run.
///
/// Field order is the serialised order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Quantized state: hazard followed by one entry per channel.
    pub xq: Vec<i64>,
    /// One residue per prime modulus.
    pub residues: Vec<u64>,
    pub primes: Vec<u64>,
    /// Lowercase hex Merkle root (empty for an empty leaf set).
    pub merkle_root_hex: String,
    pub policy: String,
}

impl Report {
    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| PipelineError::Serialization(err.to_string()))
    }

    /// Single-line JSON.
    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string(self).map_err(|err| PipelineError::Serialization(err.to_string()))
    }
}
