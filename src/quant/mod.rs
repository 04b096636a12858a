//! Quantization of the hazard/allocation state and modular residues.
//!
//! The state is quantized component-wise as `round(x / step)` with ties
//! rounded to even. Residues are inner products of integer rows with the
//! quantized vector, reduced into `[0, p)` for each modulus `p`.

use serde::{Deserialize, Serialize};

/// Failures surfaced while quantizing or reducing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantError {
    /// The quantization step was zero, negative or not finite.
    #[error("quantization step must be positive and finite, got {got}")]
    NonPositiveStep { got: f64 },
    /// A state component was NaN or infinite.
    #[error("state component {index} is not finite")]
    NonFinite { index: usize },
    /// A quantized component does not fit into `i64`.
    #[error("state component {index} overflows the quantized range")]
    OutOfRange { index: usize },
    /// A residue row does not match the quantized vector width.
    #[error("residue row {row} has width {got}, expected {expected}")]
    RowWidthMismatch { row: usize, expected: usize, got: usize },
    /// The number of rows and moduli differ.
    #[error("{rows} residue rows for {moduli} moduli")]
    RowCountMismatch { rows: usize, moduli: usize },
    /// A modulus below 2 was supplied.
    #[error("modulus {got} at position {index} is below 2")]
    ModulusTooSmall { index: usize, got: u64 },
}

/// Named continuous state fed into quantization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub hazard: f64,
    pub allocation: Vec<f64>,
}

impl StateVector {
    /// Components in canonical order: hazard first, then each channel.
    pub fn components(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.hazard).chain(self.allocation.iter().copied())
    }

    /// Number of components.
    pub fn width(&self) -> usize {
        1 + self.allocation.len()
    }

    /// Quantizes every component with `step`.
    pub fn quantize(&self, step: f64) -> Result<QuantizedState, QuantError> {
        let mut quantized = quantize(self.components(), step)?;
        let allocation = quantized.split_off(1);
        Ok(QuantizedState {
            hazard: quantized[0],
            allocation,
        })
    }
}

/// Quantized counterpart of [`StateVector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizedState {
    pub hazard: i64,
    pub allocation: Vec<i64>,
}

impl QuantizedState {
    /// Flattens into the canonical `[hazard, allocation...]` vector.
    pub fn to_vec(&self) -> Vec<i64> {
        let mut flat = Vec::with_capacity(1 + self.allocation.len());
        flat.push(self.hazard);
        flat.extend_from_slice(&self.allocation);
        flat
    }
}

/// Quantizes `values` to integer multiples of `step`, rounding ties to even.
pub fn quantize<I>(values: I, step: f64) -> Result<Vec<i64>, QuantError>
where
    I: IntoIterator<Item = f64>,
{
    if !step.is_finite() || step <= 0.0 {
        return Err(QuantError::NonPositiveStep { got: step });
    }
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_finite() {
                return Err(QuantError::NonFinite { index });
            }
            let scaled = (value / step).round_ties_even();
            if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
                return Err(QuantError::OutOfRange { index });
            }
            Ok(scaled as i64)
        })
        .collect()
}

/// Computes `(rows[j] · xq) mod moduli[j]` for every row.
pub fn residues(rows: &[Vec<i64>], xq: &[i64], moduli: &[u64]) -> Result<Vec<u64>, QuantError> {
    if rows.len() != moduli.len() {
        return Err(QuantError::RowCountMismatch {
            rows: rows.len(),
            moduli: moduli.len(),
        });
    }
    rows.iter()
        .zip(moduli)
        .enumerate()
        .map(|(row, (coefficients, &modulus))| {
            if coefficients.len() != xq.len() {
                return Err(QuantError::RowWidthMismatch {
                    row,
                    expected: xq.len(),
                    got: coefficients.len(),
                });
            }
            if modulus < 2 {
                return Err(QuantError::ModulusTooSmall {
                    index: row,
                    got: modulus,
                });
            }
            let modulus = i128::from(modulus);
            // Each product fits in i128; reducing it keeps the sum below len * modulus.
            // rem_euclid keeps every term in [0, modulus) for negative products.
            let inner: i128 = coefficients
                .iter()
                .zip(xq)
                .map(|(a, x)| (i128::from(*a) * i128::from(*x)).rem_euclid(modulus))
                .sum();
            Ok(inner.rem_euclid(modulus) as u64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_rounds_half_to_even() {
        let q = quantize([0.5, 1.5, 2.5, -0.5, 0.26], 1.0).unwrap();
        assert_eq!(q, vec![0, 2, 2, 0, 0]);
    }

    #[test]
    fn quantize_rejects_bad_step() {
        assert_eq!(
            quantize([1.0], 0.0).unwrap_err(),
            QuantError::NonPositiveStep { got: 0.0 }
        );
    }

    #[test]
    fn quantize_rejects_non_finite_values() {
        assert_eq!(
            quantize([1.0, f64::INFINITY], 0.1).unwrap_err(),
            QuantError::NonFinite { index: 1 }
        );
    }

    #[test]
    fn state_roundtrips_through_named_fields() {
        let state = StateVector {
            hazard: 0.82,
            allocation: vec![6.36, 8.0],
        };
        let quantized = state.quantize(0.01).unwrap();
        assert_eq!(quantized.hazard, 82);
        assert_eq!(quantized.allocation, vec![636, 800]);
        assert_eq!(quantized.to_vec(), vec![82, 636, 800]);
    }

    #[test]
    fn residues_match_reference_demo() {
        let rows = vec![vec![2, 1, 0, 3], vec![1, 4, 1, 2], vec![3, 0, 5, 1]];
        let r = residues(&rows, &[82, 636, 800, 964], &[101, 103, 107]).unwrap();
        assert_eq!(r, vec![56, 101, 74]);
    }

    #[test]
    fn residues_are_non_negative_for_negative_products() {
        let r = residues(&[vec![-1]], &[5], &[7]).unwrap();
        assert_eq!(r, vec![2]);
    }

    #[test]
    fn residues_do_not_overflow_on_extreme_rows() {
        let r = residues(&[vec![i64::MAX; 3]], &[i64::MAX; 3], &[101]).unwrap();
        assert_eq!(r, vec![28]);

        let r = residues(&[vec![i64::MAX; 64]], &[i64::MAX; 64], &[u64::MAX]).unwrap();
        assert_eq!(r, vec![16]);

        let r = residues(&[vec![i64::MIN, i64::MAX]], &[i64::MAX, i64::MAX], &[101]).unwrap();
        assert_eq!(r, vec![12]);
    }

    #[test]
    fn residues_reject_width_mismatch() {
        let err = residues(&[vec![1, 2]], &[1, 2, 3], &[7]).unwrap_err();
        assert_eq!(
            err,
            QuantError::RowWidthMismatch {
                row: 0,
                expected: 3,
                got: 2
            }
        );
    }
}
