// ============================================================
// Search Report and Selection Rule
// ============================================================
// One entry per evaluated combination, in enumeration order.
//
// Selection: highest mean score; ties go to the lower standard
// deviation, then to the earlier entry. Failed entries are never
// selected.

use serde::{Deserialize, Serialize};

use crate::domain::hyperparams::Hyperparameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Scored {
        mean_score:  f64,
        std_score:   f64,
        fold_scores: Vec<f64>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub params:  Hyperparameters,
    pub outcome: EntryOutcome,
}

impl SearchEntry {
    pub fn scored(params: Hyperparameters, fold_scores: Vec<f64>) -> Self {
        let (mean_score, std_score) = mean_std(&fold_scores);
        Self {
            params,
            outcome: EntryOutcome::Scored { mean_score, std_score, fold_scores },
        }
    }

    pub fn failed(params: Hyperparameters, reason: impl Into<String>) -> Self {
        Self { params, outcome: EntryOutcome::Failed { reason: reason.into() } }
    }

    /// (mean, std) for scored entries
    pub fn scores(&self) -> Option<(f64, f64)> {
        match &self.outcome {
            EntryOutcome::Scored { mean_score, std_score, .. } => Some((*mean_score, *std_score)),
            EntryOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub entries: Vec<SearchEntry>,
}

impl SearchReport {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self { entries }
    }

    pub fn best(&self) -> Option<&SearchEntry> {
        let mut best: Option<(&SearchEntry, f64, f64)> = None;
        for entry in &self.entries {
            let Some((mean, std)) = entry.scores() else { continue };
            let better = match best {
                None => true,
                Some((_, best_mean, best_std)) => {
                    mean > best_mean || (mean == best_mean && std < best_std)
                }
            };
            if better {
                best = Some((entry, mean, std));
            }
        }
        best.map(|(entry, _, _)| entry)
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.scores().is_none()).count()
    }
}

/// The winner plus the full report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best_params: Hyperparameters,
    pub best_score:  f64,
    pub best_std:    f64,
    pub report:      SearchReport,
}

/// Mean and population standard deviation
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n    = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var  = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(hidden_units: usize) -> Hyperparameters {
        Hyperparameters { learning_rate: 0.001, hidden_units, sequence_length: 12 }
    }

    #[test]
    fn test_mean_std() {
        let (m, s) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(m, 5.0);
        assert_eq!(s, 2.0);
    }

    #[test]
    fn test_highest_mean_wins() {
        let report = SearchReport::new(vec![
            SearchEntry::scored(params(1), vec![0.2, 0.4]),
            SearchEntry::scored(params(2), vec![0.6, 0.8]),
            SearchEntry::scored(params(3), vec![0.5, 0.5]),
        ]);
        assert_eq!(report.best().unwrap().params.hidden_units, 2);
    }

    #[test]
    fn test_tie_goes_to_lower_std() {
        let report = SearchReport::new(vec![
            SearchEntry::scored(params(1), vec![0.4, 0.6]),
            SearchEntry::scored(params(2), vec![0.5, 0.5]),
        ]);
        assert_eq!(report.best().unwrap().params.hidden_units, 2);
    }

    #[test]
    fn test_full_tie_goes_to_first() {
        let report = SearchReport::new(vec![
            SearchEntry::scored(params(1), vec![0.5, 0.5]),
            SearchEntry::scored(params(2), vec![0.5, 0.5]),
        ]);
        assert_eq!(report.best().unwrap().params.hidden_units, 1);
    }

    #[test]
    fn test_failed_entries_are_skipped() {
        let report = SearchReport::new(vec![
            SearchEntry::failed(params(1), "diverged"),
            SearchEntry::scored(params(2), vec![0.1]),
        ]);
        assert_eq!(report.best().unwrap().params.hidden_units, 2);
        assert_eq!(report.failed_count(), 1);

        let all_failed = SearchReport::new(vec![SearchEntry::failed(params(1), "x")]);
        assert!(all_failed.best().is_none());
    }
}
