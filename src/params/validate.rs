use super::builder::PipelineParamsBuilder;
use super::types::{ChannelParams, HazardParams, ResidueParams};

/// Error enumeration for parameter validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    /// A numeric field was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    /// A field that must be non-negative was negative.
    #[error("{field} must be non-negative, got {got}")]
    Negative { field: &'static str, got: f64 },
    /// A field that must be strictly positive was not.
    #[error("{field} must be positive, got {got}")]
    NonPositive { field: &'static str, got: f64 },
    /// No channels were configured.
    #[error("at least one channel is required")]
    NoChannels,
    /// Loss weights and capacities differ in length.
    #[error("{loss_weights} loss weights for {capacities} capacities")]
    ChannelCountMismatch {
        loss_weights: usize,
        capacities: usize,
    },
    /// Rows, primes and metadata must pair up one-to-one.
    #[error("{rows} residue rows, {primes} primes and {metadata} metadata entries must match")]
    ResidueCountMismatch {
        rows: usize,
        primes: usize,
        metadata: usize,
    },
    /// A residue row does not span the quantized state.
    #[error("residue row {row} has width {got}, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// A configured modulus is not prime.
    #[error("modulus {got} is not prime")]
    NotPrime { got: u64 },
    /// The parameter file could not be parsed.
    #[error("failed to parse parameters: {reason}")]
    Parse { reason: String },
}

/// Validates every builder field.
pub fn validate(builder: &PipelineParamsBuilder) -> Result<(), ParamsError> {
    validate_hazard(&builder.hazard)?;
    validate_channels(&builder.channels)?;
    validate_scalars(builder.budget, builder.epsilon, builder.quant_step)?;
    validate_residues(&builder.residues, builder.metadata.len(), builder.channels.len())?;
    Ok(())
}

fn validate_hazard(hazard: &HazardParams) -> Result<(), ParamsError> {
    non_negative("hazard.baseline", hazard.baseline)?;
    non_negative("hazard.excitation_weight", hazard.excitation_weight)?;
    non_negative("hazard.decay", hazard.decay)?;
    non_negative("hazard.bumps", hazard.bumps)?;
    non_negative("hazard.horizon", hazard.horizon)?;
    for &t in &hazard.past_event_times {
        non_negative("hazard.past_event_times", t)?;
    }
    Ok(())
}

fn validate_channels(channels: &ChannelParams) -> Result<(), ParamsError> {
    if channels.loss_weights.len() != channels.capacities.len() {
        return Err(ParamsError::ChannelCountMismatch {
            loss_weights: channels.loss_weights.len(),
            capacities: channels.capacities.len(),
        });
    }
    if channels.is_empty() {
        return Err(ParamsError::NoChannels);
    }
    for &weight in &channels.loss_weights {
        finite("channels.loss_weights", weight)?;
    }
    for &cap in &channels.capacities {
        non_negative("channels.capacities", cap)?;
    }
    Ok(())
}

fn validate_scalars(budget: f64, epsilon: f64, quant_step: f64) -> Result<(), ParamsError> {
    non_negative("budget", budget)?;
    positive("epsilon", epsilon)?;
    positive("quant_step", quant_step)?;
    Ok(())
}

fn validate_residues(
    residues: &ResidueParams,
    metadata: usize,
    channels: usize,
) -> Result<(), ParamsError> {
    if residues.rows.len() != residues.primes.len() || residues.primes.len() != metadata {
        return Err(ParamsError::ResidueCountMismatch {
            rows: residues.rows.len(),
            primes: residues.primes.len(),
            metadata,
        });
    }
    let expected = 1 + channels;
    for (row, coefficients) in residues.rows.iter().enumerate() {
        if coefficients.len() != expected {
            return Err(ParamsError::RowWidthMismatch {
                row,
                expected,
                got: coefficients.len(),
            });
        }
    }
    if let Some(&got) = residues.primes.iter().find(|p| !is_prime(**p)) {
        return Err(ParamsError::NotPrime { got });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ParamsError> {
    if !value.is_finite() {
        return Err(ParamsError::NonFinite { field });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ParamsError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ParamsError::Negative { field, got: value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ParamsError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ParamsError::NonPositive { field, got: value });
    }
    Ok(())
}

/// Deterministic trial division; moduli are small configuration constants.
pub(crate) fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primality_of_small_values() {
        let primes: Vec<u64> = (0..30).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(104_729));
        assert!(!is_prime(101 * 103));
    }
}
