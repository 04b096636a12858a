use serde::{Deserialize, Serialize};

use crate::hash::{hash, HashFamily};

use super::builder::PipelineParamsBuilder;
use super::types::{ChannelParams, HazardParams, ResidueParams};
use super::validate::{validate, ParamsError};

/// Domain tag prefixed to the canonical JSON encoding when hashing parameters.
const PARAMS_DIGEST_DOMAIN_TAG: &[u8] = b"SDA-PARAMS-V1";

/// Validated parameter set for one pipeline run.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `hazard` | [`HazardParams`] | Hazard model inputs. |
/// | `channels` | [`ChannelParams`] | Loss weights and capacities. |
/// | `budget` | `f64` | Total control budget `B`. |
/// | `epsilon` | `f64` | Bisection tolerance. |
/// | `quant_step` | `f64` | Quantization step `Δ`. |
/// | `residues` | [`ResidueParams`] | Residue rows and prime moduli. |
/// | `metadata` | `Vec<String>` | One metadata record per residue leaf. |
/// | `hash` | [`HashFamily`] | Hash family for leaves and nodes. |
///
/// Instances only come out of [`PipelineParamsBuilder::build`], so every
/// accessor returns validated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    pub(crate) hazard: HazardParams,
    pub(crate) channels: ChannelParams,
    pub(crate) budget: f64,
    pub(crate) epsilon: f64,
    pub(crate) quant_step: f64,
    pub(crate) residues: ResidueParams,
    pub(crate) metadata: Vec<String>,
    pub(crate) hash: HashFamily,
}

impl PipelineParams {
    pub fn hazard(&self) -> &HazardParams {
        &self.hazard
    }

    pub fn channels(&self) -> &ChannelParams {
        &self.channels
    }

    pub const fn budget(&self) -> f64 {
        self.budget
    }

    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub const fn quant_step(&self) -> f64 {
        self.quant_step
    }

    pub fn residues(&self) -> &ResidueParams {
        &self.residues
    }

    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    pub const fn hash(&self) -> HashFamily {
        self.hash
    }

    /// SHA-256 digest over the domain tag and the canonical JSON encoding.
    ///
    /// Identical parameter sets always produce the same digest; it is logged
    /// with every run so reports can be traced back to their inputs.
    pub fn params_digest(&self) -> [u8; 32] {
        let mut payload = PARAMS_DIGEST_DOMAIN_TAG.to_vec();
        // Serialising plain structs of numbers, strings and unit enums cannot fail.
        payload.extend(serde_json::to_vec(self).unwrap_or_default());
        hash(&payload).into_bytes()
    }

    pub(crate) fn try_from_builder(builder: &PipelineParamsBuilder) -> Result<Self, ParamsError> {
        validate(builder)?;
        Ok(Self {
            hazard: builder.hazard.clone(),
            channels: builder.channels.clone(),
            budget: builder.budget,
            epsilon: builder.epsilon,
            quant_step: builder.quant_step,
            residues: builder.residues.clone(),
            metadata: builder.metadata.clone(),
            hash: builder.hash,
        })
    }
}
