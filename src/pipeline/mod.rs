//! Sequential composition of the pipeline stages.
//!
//! ```text
//! params ─▶ hazard ─▶ slopes ─▶ water-filling ─▶ StateVector
//!        ─▶ QuantizedState ─▶ residues ─▶ leaves ─▶ Merkle root ─▶ Report
//! ```
//!
//! Stages hand over named records rather than positional vectors. Leaf
//! binding (`residue || "||" || metadata`) is done here, before the tree
//! builder sees the records.

use tracing::{debug, info, info_span};

use crate::allocator::{allocate_detailed, Allocation};
use crate::hash::Hash;
use crate::hazard::{self, HazardEstimate};
use crate::merkle::{leaf, merkle_root_with_family, MerkleRoot};
use crate::params::PipelineParams;
use crate::quant::{residues, QuantizedState, StateVector};
use crate::report::{Report, POLICY_LABEL};
use crate::PipelineResult;

/// Intermediate values of one run, for inspection and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineTrace {
    pub hazard: HazardEstimate,
    pub slopes: Vec<f64>,
    pub allocation: Allocation,
    pub state: StateVector,
    pub quantized: QuantizedState,
    pub residues: Vec<u64>,
    pub leaves: Vec<Hash>,
    pub root: MerkleRoot,
}

/// Runs the pipeline and returns the report.
pub fn run(params: &PipelineParams) -> PipelineResult<Report> {
    run_with_trace(params).map(|(report, _)| report)
}

/// Runs the pipeline and returns the report together with every intermediate.
pub fn run_with_trace(params: &PipelineParams) -> PipelineResult<(Report, PipelineTrace)> {
    let span = info_span!("pipeline", hash = %params.hash(), channels = params.channels().len());
    let _guard = span.enter();
    debug!(
        params_digest = %hex::encode(params.params_digest()),
        "starting run"
    );

    let estimate = hazard::estimate(params.hazard());
    let slopes = hazard::loss_slopes(estimate.probability, &params.channels().loss_weights);

    let allocation = allocate_detailed(
        &slopes,
        &params.channels().capacities,
        params.budget(),
        params.epsilon(),
    )?;

    let state = StateVector {
        hazard: estimate.probability,
        allocation: allocation.values.clone(),
    };
    let quantized = state.quantize(params.quant_step())?;
    let xq = quantized.to_vec();
    debug!(?xq, "state quantized");

    let residues = residues(&params.residues().rows, &xq, &params.residues().primes)?;
    debug!(?residues, "residues reduced");

    let leaves = leaf::prepare_leaves(params.hash(), &residues, params.metadata());
    let root = merkle_root_with_family(params.hash(), &leaves);
    info!(root = %root.to_hex(), leaves = leaves.len(), "commitment computed");

    let report = Report {
        xq,
        residues: residues.clone(),
        primes: params.residues().primes.clone(),
        merkle_root_hex: root.to_hex(),
        policy: POLICY_LABEL.to_string(),
    };
    let trace = PipelineTrace {
        hazard: estimate,
        slopes,
        allocation,
        state,
        quantized,
        residues,
        leaves,
        root,
    };
    Ok((report, trace))
}
