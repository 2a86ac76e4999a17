// ============================================================
// Layer 4 - Train/Test Splitter and K-Fold
// ============================================================
// split_train_test: seeded Fisher-Yates shuffle, then the last
//   ceil(test_fraction * n) items become the held-out set.
//   Same seed + same input → same split.
//
// k_fold: contiguous, unshuffled folds over 0..n. The first
//   n % k folds hold one extra sample.
//
//   n = 10, k = 3 → validation [0..4], [4..7], [7..10]
//
// Reference: rand crate documentation (SliceRandom, StdRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{DnaModelError, Result};

/// Shuffle `samples` with `seed` and split into (train, test).
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DnaModelError::InvalidConfig(format!(
            "test fraction {test_fraction} must lie strictly between 0 and 1"
        )));
    }

    let total  = samples.len();
    let n_test = ((total as f64) * test_fraction).ceil() as usize;
    if total < 2 || n_test >= total {
        return Err(DnaModelError::InvalidConfig(format!(
            "{total} sample(s) cannot be split into train and test partitions"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let test = samples.split_off(total - n_test);

    tracing::debug!(
        "Dataset split: {} training, {} held out (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    Ok((samples, test))
}

/// Index sets for one cross-validation fold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train:      Vec<usize>,
    pub validation: Vec<usize>,
}

pub fn k_fold(n: usize, k: usize) -> Result<Vec<Fold>> {
    if k < 2 {
        return Err(DnaModelError::InvalidConfig(format!("need at least 2 folds, got {k}")));
    }
    if n < k {
        return Err(DnaModelError::InvalidConfig(format!(
            "cannot make {k} folds from {n} training samples"
        )));
    }

    let base  = n / k;
    let extra = n % k;
    let mut folds = Vec::with_capacity(k);
    let mut start = 0;

    for i in 0..k {
        let size = base + usize::from(i < extra);
        let end  = start + size;
        folds.push(Fold {
            train:      (0..start).chain(end..n).collect(),
            validation: (start..end).collect(),
        });
        start = end;
    }
    Ok(folds)
}

/// Pick `indices` out of `items`, cloning
pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.15, 42).unwrap();
        assert_eq!(train.len(), 85);
        assert_eq!(test.len(),  15);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_train_test(items, 0.15, 42).unwrap();
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.3, 7).unwrap();
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..40).collect::<Vec<usize>>(), 0.15, 42).unwrap();
        let b = split_train_test((0..40).collect::<Vec<usize>>(), 0.15, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_small_dataset() {
        assert!(split_train_test(vec![1usize], 0.15, 42).is_err());
        assert!(split_train_test((0..10).collect::<Vec<usize>>(), 1.0, 42).is_err());
    }

    #[test]
    fn test_k_fold_sizes() {
        let folds = k_fold(10, 3).unwrap();
        let sizes: Vec<usize> = folds.iter().map(|f| f.validation.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(folds[1].validation, vec![4, 5, 6]);
        assert_eq!(folds[1].train, vec![0, 1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn test_k_fold_rejects_bad_counts() {
        assert!(k_fold(10, 1).is_err());
        assert!(k_fold(3, 5).is_err());
    }
}
