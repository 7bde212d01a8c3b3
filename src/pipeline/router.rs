//! Routes classified images into a label-keyed output tree.

use crate::core::{ClassifyError, ClassifyResult, LabelSet, ProcessingStage};
use crate::inference::Prediction;
use crate::processors::CanonicalImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Owns the output tree: one subdirectory per label under a single root.
///
/// Precondition for every run: the root is a directory reserved for pipeline
/// output. [`OutputRouter::prepare`] deletes it outright before rebuilding,
/// so anything else stored under it is lost.
///
/// Labels are joined onto the root as path segments, so a label containing a
/// separator (the default table's `T-shirt/top`) materializes as a nested
/// directory. Files routed under the same label with the same name overwrite
/// each other, last write wins.
#[derive(Debug)]
pub struct OutputRouter {
    root: PathBuf,
    labels: LabelSet,
}

impl OutputRouter {
    /// Creates a router writing under `root` with one subdirectory per label.
    pub fn new(root: impl Into<PathBuf>, labels: LabelSet) -> Self {
        Self {
            root: root.into(),
            labels,
        }
    }

    /// Returns the output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Clears any previous run's tree and creates a fresh subdirectory per
    /// label.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the old tree cannot be removed or the new one
    /// cannot be created. Callers treat this as fatal for the whole run.
    pub fn prepare(&self) -> ClassifyResult<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        fs::create_dir_all(&self.root)?;

        for label in self.labels.iter() {
            fs::create_dir_all(self.root.join(label))?;
        }

        debug!(
            "prepared output tree at {} with {} label directories",
            self.root.display(),
            self.labels.len()
        );
        Ok(())
    }

    /// Writes the canonical image under its predicted label, preserving the
    /// original filename verbatim.
    ///
    /// # Errors
    ///
    /// Returns a routing error if the write fails. The caller logs it and
    /// skips the file; the run continues.
    pub fn route(&self, image: &CanonicalImage, prediction: &Prediction) -> ClassifyResult<()> {
        let destination = self
            .root
            .join(&prediction.label)
            .join(&prediction.filename);

        image.gray.save(&destination).map_err(|e| {
            ClassifyError::processing_error(
                ProcessingStage::Routing,
                &format!("writing {}", destination.display()),
                e,
            )
        })
    }
}
