//! ONNX Runtime bridge for trained classifier artifacts.
//!
//! The [`TrainedModel`] trait is the pipeline's only view of the classifier:
//! one canonical tensor in, one probability vector out. [`OrtModel`] is the
//! concrete implementation backed by an ONNX Runtime session; any other
//! numeric runtime can stand in behind the same trait.

use crate::core::{ClassifyError, ClassifyResult, Tensor3D};
use ort::{session::Session, value::TensorRef};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// An opaque trained classifier.
///
/// Implementations accept a single-channel (1, height, width) tensor and
/// return the class probability vector. Inference is a pure function of the
/// input and the model's read-only weights, so implementations must be
/// shareable across worker threads.
pub trait TrainedModel: Send + Sync {
    /// Runs one forward pass and returns the class probability vector.
    fn predict(&self, input: &Tensor3D) -> ClassifyResult<Vec<f32>>;
}

/// `TrainedModel` backed by an ONNX Runtime session.
///
/// The session is loaded once at startup and guarded by a mutex; ONNX
/// Runtime sessions require exclusive access to run.
pub struct OrtModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_path: PathBuf,
}

impl std::fmt::Debug for OrtModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtModel")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .finish()
    }
}

impl OrtModel {
    /// Loads the model artifact at `path` and discovers its tensor names.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing, unreadable, or corrupt,
    /// or if it declares no inputs or outputs. Callers treat this as fatal:
    /// it happens before any image work starts.
    pub fn load(path: &Path) -> ClassifyResult<Self> {
        let session = Session::builder().and_then(|b| b.commit_from_file(path))?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .ok_or_else(|| {
                ClassifyError::invalid_input(format!(
                    "model {} declares no inputs",
                    path.display()
                ))
            })?;
        let output_name = session
            .outputs()
            .first()
            .map(|output| output.name().to_string())
            .ok_or_else(|| {
                ClassifyError::invalid_input(format!(
                    "model {} declares no outputs",
                    path.display()
                ))
            })?;

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
        })
    }

    /// Returns the path of the loaded model artifact.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl TrainedModel for OrtModel {
    fn predict(&self, input: &Tensor3D) -> ClassifyResult<Vec<f32>> {
        let input_tensor = TensorRef::from_array_view(input.view())?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            ClassifyError::invalid_input("failed to acquire model session lock")
        })?;
        let outputs = session.run(inputs)?;

        let (shape, data) = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        if shape.len() != 2 || shape[0] != 1 {
            return Err(ClassifyError::invalid_input(format!(
                "model {}: expected a (1, C) probability tensor, got shape {:?}",
                self.model_path.display(),
                shape
            )));
        }

        let classes = shape[1] as usize;
        if data.len() != classes {
            return Err(ClassifyError::invalid_input(format!(
                "model {}: output declares {} classes but carries {} values",
                self.model_path.display(),
                classes,
                data.len()
            )));
        }

        Ok(data.to_vec())
    }
}
