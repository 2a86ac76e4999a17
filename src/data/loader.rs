// ============================================================
// Layer 4 - Expression Table Loader
// ============================================================
// Reads a delimited table with a header row. Only the first two
// columns are used:
//
//   sequence,expression
//   ACGTACGTACGT,1.25
//   TTGCAGGCATCA,-0.4
//
// Header names are compared after trimming and lower-casing, so
// " Expression" is accepted. A `.tsv` extension switches the
// separator to a tab.
//
// Cells that cannot be read as a number become `None` here; the
// cleaning stage decides what to do with them.

use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::domain::record::RawRecord;
use crate::domain::traits::RecordSource;
use crate::error::{DnaModelError, Result};

pub const SEQUENCE_COLUMN: &str = "sequence";
pub const EXPRESSION_COLUMN: &str = "expression";

/// Loads (sequence, expression) rows from a CSV/TSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct TableLoader {
    path: PathBuf,
}

impl TableLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn separator(&self) -> u8 {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        }
    }

    fn read_frame(&self) -> Result<DataFrame> {
        if !self.path.is_file() {
            return Err(DnaModelError::DataLoad(format!(
                "input file '{}' does not exist",
                self.path.display()
            )));
        }

        let separator = self.separator();
        CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_separator(separator))
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .and_then(|reader| reader.finish())
            .map_err(|e| {
                DnaModelError::DataLoad(format!("cannot read '{}': {}", self.path.display(), e))
            })
    }
}

impl RecordSource for TableLoader {
    fn load_records(&self) -> Result<Vec<RawRecord>> {
        let df = self.read_frame()?;

        let columns = df.get_columns();
        if columns.len() < 2 {
            return Err(DnaModelError::DataLoad(format!(
                "expected columns '{SEQUENCE_COLUMN}' and '{EXPRESSION_COLUMN}', found {} column(s)",
                columns.len()
            )));
        }
        let (seq_col, expr_col) = (&columns[0], &columns[1]);
        check_header(seq_col.name().as_str(), SEQUENCE_COLUMN)?;
        check_header(expr_col.name().as_str(), EXPRESSION_COLUMN)?;

        let polars_err = |e: PolarsError| DnaModelError::DataLoad(e.to_string());

        let sequences   = seq_col.cast(&DataType::String).map_err(polars_err)?;
        let sequences   = sequences.str().map_err(polars_err)?;
        let expressions = expr_col.cast(&DataType::Float64).map_err(polars_err)?;
        let expressions = expressions.f64().map_err(polars_err)?;

        let records: Vec<RawRecord> = (0..df.height())
            .map(|i| {
                RawRecord::new(
                    i + 1,
                    sequences.get(i).map(str::to_string),
                    expressions.get(i),
                )
            })
            .collect();

        tracing::info!("Loaded {} rows from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

fn check_header(found: &str, expected: &str) -> Result<()> {
    if found.trim().eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(DnaModelError::DataLoad(format!(
            "missing column '{expected}' (found '{found}')"
        )))
    }
}
