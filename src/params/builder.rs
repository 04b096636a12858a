use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hash::HashFamily;
use crate::{PipelineError, PipelineResult};

use super::types::{ChannelParams, HazardParams, ResidueParams};
use super::{ParamsError, PipelineParams};

/// Builder used to assemble [`PipelineParams`] with validation.
///
/// | Field | Default ([`BuiltinProfile::Demo`]) |
/// |-------|---------|
/// | `hazard` | baseline `0.012`, weight `0.18`, decay `0.12`, bumps `0.04`, events `[25, 12, 4]`, horizon `8` |
/// | `channels` | loss weights `[3, 5, 7]`, capacities `[8, 10, 12]` |
/// | `budget` | `24` |
/// | `epsilon` | `1e-6` |
/// | `quant_step` | `0.01` |
/// | `residues` | rows `[[2,1,0,3],[1,4,1,2],[3,0,5,1]]`, primes `[101, 103, 107]` |
/// | `metadata` | `["meta1", "meta2", "meta3"]` |
/// | `hash` | [`HashFamily::Sha256`] |
///
/// Deserialisation fills missing fields from the demo profile, so a
/// parameter file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineParamsBuilder {
    pub hazard: HazardParams,
    pub channels: ChannelParams,
    pub budget: f64,
    pub epsilon: f64,
    pub quant_step: f64,
    pub residues: ResidueParams,
    pub metadata: Vec<String>,
    pub hash: HashFamily,
}

impl PipelineParamsBuilder {
    /// Returns a builder initialised with the demo profile.
    pub fn new() -> Self {
        Self::from_profile(BuiltinProfile::Demo)
    }

    /// Loads one of the built-in profiles.
    pub fn from_profile(profile: BuiltinProfile) -> Self {
        match profile {
            BuiltinProfile::Demo => PipelineParamsBuilder {
                hazard: HazardParams {
                    baseline: 0.012,
                    excitation_weight: 0.18,
                    decay: 0.12,
                    bumps: 0.04,
                    past_event_times: vec![25.0, 12.0, 4.0],
                    horizon: 8.0,
                },
                channels: ChannelParams {
                    loss_weights: vec![3.0, 5.0, 7.0],
                    capacities: vec![8.0, 10.0, 12.0],
                },
                budget: 24.0,
                epsilon: 1e-6,
                quant_step: 0.01,
                residues: ResidueParams {
                    rows: vec![vec![2, 1, 0, 3], vec![1, 4, 1, 2], vec![3, 0, 5, 1]],
                    primes: vec![101, 103, 107],
                },
                metadata: vec!["meta1".into(), "meta2".into(), "meta3".into()],
                hash: HashFamily::Sha256,
            },
        }
    }

    /// Parses a JSON parameter document; absent fields keep demo defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        serde_json::from_str(json).map_err(|err| ParamsError::Parse {
            reason: err.to_string(),
        })
    }

    /// Reads and parses a JSON parameter file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| PipelineError::Io {
            path: path.to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        })?;
        Ok(Self::from_json(&json)?)
    }

    /// Validates the builder fields and emits a [`PipelineParams`] instance.
    pub fn build(&self) -> Result<PipelineParams, ParamsError> {
        PipelineParams::try_from_builder(self)
    }
}

/// Supported built-in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinProfile {
    /// Three-channel demo reproducing the reference report.
    Demo,
}

impl Default for PipelineParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
