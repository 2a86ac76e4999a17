// ============================================================
// Layer 6 - Model Store
// ============================================================
// Saves a trained model under a dated stem and restores it later.
//
// What gets written per run (stem = dnamodel<YYYY-MM-DD>):
//   1. <stem>.mpk.gz       weights, written by the model itself
//   2. <stem>.config.json  architecture, written by the model itself
//   3. <stem>.json         manifest: winning params, L, target scaler,
//                          effective config, held-out r², search report
//
// The manifest is what makes the artifact usable on its own: the
// scaler maps predictions back to expression units and L tells the
// predict command which inputs are acceptable.
//
// Same-day runs reuse the stem and overwrite the previous files.
// Files are staged under <stem>-partial and renamed into place only
// after all of them were written.
//
//   out/
//     dnamodel2024-03-01.mpk.gz
//     dnamodel2024-03-01.config.json
//     dnamodel2024-03-01.json
//     search_report.csv
//
// Reference: Burn Book §5 (Records and Checkpointing)

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::application::train_use_case::TrainConfig;
use crate::data::normalizer::TargetScaler;
use crate::domain::hyperparams::Hyperparameters;
use crate::domain::traits::RegressionModel;
use crate::error::{DnaModelError, Result};
use crate::search::report::SearchReport;

pub const ARTIFACT_PREFIX: &str = "dnamodel";

/// Suffixes a user may paste after the stem; stripped by `stem_from`
const KNOWN_SUFFIXES: [&str; 3] = [".mpk.gz", ".config.json", ".json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub created:         NaiveDate,
    pub best_params:     Hyperparameters,
    pub sequence_length: usize,
    pub scaler:          TargetScaler,
    pub test_r2:         f64,
    pub config:          TrainConfig,
    pub search:          SearchReport,
}

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            DnaModelError::Persistence(format!("Cannot create '{}': {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{ARTIFACT_PREFIX}{}", date.format("%Y-%m-%d")))
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn manifest_path(stem: &Path) -> PathBuf {
        stem.with_extension("json")
    }

    /// Accepts either a bare stem or the path of one of its files
    pub fn stem_from(path: &Path) -> PathBuf {
        let text = path.to_string_lossy();
        KNOWN_SUFFIXES
            .iter()
            .find_map(|suffix| text.strip_suffix(suffix))
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf())
    }

    /// Every file belonging to the artifact at `stem`
    pub fn artifact_paths<M: RegressionModel>(stem: &Path) -> Vec<PathBuf> {
        let mut paths = M::artifact_paths(stem);
        paths.push(Self::manifest_path(stem));
        paths
    }

    /// Save under the stem for `manifest.created`. Returns the stem.
    ///
    /// All files are first written under a staging stem and renamed
    /// into place only once every write succeeded. On any failure the
    /// staged files are removed; a failure while renaming also removes
    /// the renamed files, so no partial artifact is left at the stem.
    pub fn save<M: RegressionModel>(&self, model: &M, manifest: &ModelManifest) -> Result<PathBuf> {
        let stem    = self.stem_for(manifest.created);
        let staging = staging_stem(&stem);

        if let Err(e) = write_artifact(model, manifest, &staging) {
            remove_files(&Self::artifact_paths::<M>(&staging));
            return Err(e);
        }

        let staged = Self::artifact_paths::<M>(&staging);
        let target = Self::artifact_paths::<M>(&stem);
        for (from, to) in staged.iter().zip(&target) {
            if let Err(e) = fs::rename(from, to) {
                remove_files(&staged);
                remove_files(&target);
                return Err(DnaModelError::Persistence(format!(
                    "Cannot move '{}' to '{}': {e}",
                    from.display(),
                    to.display()
                )));
            }
        }

        tracing::info!("Saved model to '{}'", stem.display());
        Ok(stem)
    }

    /// Delete every file of the artifact at `stem`
    pub fn remove<M: RegressionModel>(stem: &Path) {
        remove_files(&Self::artifact_paths::<M>(stem));
        tracing::warn!("Removed model files at '{}'", stem.display());
    }

    pub fn load_manifest(stem: &Path) -> Result<ModelManifest> {
        let path = Self::manifest_path(stem);
        let json = fs::read_to_string(&path).map_err(|e| {
            DnaModelError::Persistence(format!(
                "Cannot read manifest '{}': {e}. Has 'train' been run?",
                path.display()
            ))
        })?;
        serde_json::from_str(&json)
            .map_err(|e| DnaModelError::Persistence(format!("'{}': {e}", path.display())))
    }

    pub fn load<M: RegressionModel>(stem: &Path) -> Result<(M, ModelManifest)> {
        let manifest = Self::load_manifest(stem)?;
        let model = M::load(stem)?;
        if model.sequence_length() != manifest.sequence_length {
            return Err(DnaModelError::Persistence(format!(
                "model expects length {} but manifest records {}",
                model.sequence_length(),
                manifest.sequence_length
            )));
        }
        Ok((model, manifest))
    }
}

fn staging_stem(stem: &Path) -> PathBuf {
    let name = stem.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    stem.with_file_name(format!("{name}-partial"))
}

fn write_artifact<M: RegressionModel>(model: &M, manifest: &ModelManifest, stem: &Path) -> Result<()> {
    model.save(stem)?;

    let path = ModelStore::manifest_path(stem);
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| DnaModelError::Persistence(e.to_string()))?;
    fs::write(&path, json).map_err(|e| {
        DnaModelError::Persistence(format!("Cannot write manifest '{}': {e}", path.display()))
    })
}

fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Cannot remove '{}': {}", path.display(), e),
        }
    }
}
