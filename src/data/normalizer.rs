// ============================================================
// Layer 4 - Target Scaler
// ============================================================
// Standardises expression values to zero mean / unit variance:
//
//   z = (y - mean) / scale        scale = population std dev
//   y = z * scale + mean          (denormalize)
//
// The statistics are fitted once on the full cleaned target vector
// and stored in the model manifest so predictions can be mapped
// back to expression units later.
//
// Zero variance: scale is fixed to 1.0, so every target becomes 0.

use serde::{Deserialize, Serialize};

use crate::error::{DnaModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetScaler {
    pub mean:  f64,
    pub scale: f64,
}

impl TargetScaler {
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(DnaModelError::EmptyDataset);
        }
        let n    = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var  = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std  = var.sqrt();

        let scale = if std > f64::EPSILON * mean.abs().max(1.0) {
            std
        } else {
            tracing::warn!("Expression values have zero variance; targets will all normalise to 0");
            1.0
        };
        Ok(Self { mean, scale })
    }

    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }

    pub fn denormalize(&self, value: f64) -> f64 {
        value * self.scale + self.mean
    }

    /// Normalise a whole vector into the f32 targets the model trains on
    pub fn transform(&self, values: &[f64]) -> Vec<f32> {
        values.iter().map(|&v| self.normalize(v) as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mean_unit_variance() {
        let scaler = TargetScaler::fit(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let z = scaler.transform(&[1.0, 2.0, 3.0, 4.0]);
        let mean: f32 = z.iter().sum::<f32>() / 4.0;
        let var:  f32 = z.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / 4.0;
        assert!(mean.abs() < 1e-6);
        assert!((var - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_denormalize_inverts() {
        let scaler = TargetScaler::fit(&[10.0, 20.0, 60.0]).unwrap();
        for v in [10.0, 33.3, -5.0] {
            assert!((scaler.denormalize(scaler.normalize(v)) - v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_variance_does_not_crash() {
        let scaler = TargetScaler::fit(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(scaler.scale, 1.0);
        assert_eq!(scaler.transform(&[5.0, 5.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(TargetScaler::fit(&[]).is_err());
    }
}
