// ============================================================
// Layer 6 - Search Report Logger
// ============================================================
// Appends one CSV row per evaluated combination.
//
// Output file: <output_dir>/search_report.csv
//
//   learning_rate,hidden_units,sequence_length,status,mean_score,std_score
//   0.001,1,12,scored,0.412000,0.051000
//   0.001,3,12,scored,0.538000,0.040000
//   0.001,6,12,failed,,
//
// Rows from later runs are appended beneath earlier ones.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{DnaModelError, Result};
use crate::search::report::{EntryOutcome, SearchEntry, SearchReport};

const HEADER: &str = "learning_rate,hidden_units,sequence_length,status,mean_score,std_score";

pub struct SearchReportLogger {
    csv_path: PathBuf,
}

impl SearchReportLogger {
    /// Writes the header only if the file does not exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(io_err(dir))?;

        let csv_path = dir.join("search_report.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path).map_err(io_err(&csv_path))?;
            writeln!(f, "{HEADER}").map_err(io_err(&csv_path))?;
            tracing::debug!("Created search report CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, report: &SearchReport) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .map_err(io_err(&self.csv_path))?;

        for entry in &report.entries {
            writeln!(f, "{}", format_row(entry)).map_err(io_err(&self.csv_path))?;
        }

        tracing::debug!(
            "Logged {} search entries to '{}'",
            report.entries.len(),
            self.csv_path.display()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

fn format_row(entry: &SearchEntry) -> String {
    let p = &entry.params;
    match &entry.outcome {
        EntryOutcome::Scored { mean_score, std_score, .. } => format!(
            "{},{},{},scored,{:.6},{:.6}",
            p.learning_rate, p.hidden_units, p.sequence_length, mean_score, std_score
        ),
        EntryOutcome::Failed { .. } => format!(
            "{},{},{},failed,,",
            p.learning_rate, p.hidden_units, p.sequence_length
        ),
    }
}

fn io_err(path: &Path) -> impl Fn(std::io::Error) -> DnaModelError + '_ {
    move |e| DnaModelError::Persistence(format!("'{}': {}", path.display(), e))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hyperparams::Hyperparameters;

    fn params(hidden_units: usize) -> Hyperparameters {
        Hyperparameters { learning_rate: 0.001, hidden_units, sequence_length: 12 }
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let logger = SearchReportLogger::new(dir.path()).unwrap();
        logger
            .log(&SearchReport::new(vec![
                SearchEntry::scored(params(1), vec![0.5, 0.5]),
                SearchEntry::failed(params(3), "diverged"),
            ]))
            .unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "0.001,1,12,scored,0.500000,0.000000");
        assert_eq!(lines[2], "0.001,3,12,failed,,");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let report = SearchReport::new(vec![SearchEntry::scored(params(2), vec![0.25])]);
        SearchReportLogger::new(dir.path()).unwrap().log(&report).unwrap();
        let logger = SearchReportLogger::new(dir.path()).unwrap();
        logger.log(&report).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
