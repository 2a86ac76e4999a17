// ============================================================
// Scoring - Squared Correlation (r²)
// ============================================================
// Ordinary least squares of predictions on ground truth:
//
//   slope     = cov(x, y) / var(x)
//   intercept = mean(y) - slope * mean(x)
//   r         = cov(x, y) / (std(x) * std(y))
//
// The score is r². It is symmetric in its two arguments and lies
// in [0, 1]. Degenerate inputs (mismatched lengths, fewer than two
// points, zero variance on either side, non-finite values) score 0.0.

/// Result of a simple linear regression y ~ x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope:     f64,
    pub intercept: f64,
    pub r_value:   f64,
}

/// None when the fit is undefined (unequal lengths, n < 2, zero variance, NaN/inf)
pub fn linear_regression(x: &[f32], y: &[f32]) -> Option<LinearFit> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }

    let mean = |v: &[f32]| v.iter().map(|&a| a as f64).sum::<f64>() / n as f64;
    let (mx, my) = (mean(x), mean(y));

    let (mut sxx, mut syy, mut sxy) = (0.0f64, 0.0f64, 0.0f64);
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a as f64 - mx, b as f64 - my);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if !(sxx > 0.0 && syy > 0.0) || !sxy.is_finite() {
        return None;
    }

    let slope   = sxy / sxx;
    let r_value = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    Some(LinearFit { slope, intercept: my - slope * mx, r_value })
}

/// r² between ground truth and predictions; higher is better.
pub fn r2_score(ground_truth: &[f32], predictions: &[f32]) -> f64 {
    linear_regression(ground_truth, predictions)
        .map(|fit| fit.r_value * fit.r_value)
        .unwrap_or(0.0)
}
