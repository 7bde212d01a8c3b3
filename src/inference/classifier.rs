//! Turns canonical tensors into labeled predictions.
//!
//! The classifier owns the strict side of the model contract: it refuses
//! tensors that are not the exact shape the model was trained on, refuses
//! probability vectors that do not line up with the label table, and audits
//! the probability-distribution invariant, surfacing violations as
//! data-quality warnings rather than silently accepting them.

use crate::core::{ClassifyError, ClassifyResult, LabelSet, Tensor3D};
use crate::inference::TrainedModel;
use tracing::warn;

/// Tolerance for the probability-mass invariant check.
const PROBABILITY_SUM_TOLERANCE: f32 = 1e-3;

/// A classified input file.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Original filename of the classified image.
    pub filename: String,
    /// Index of the winning class in the label table.
    pub class_id: usize,
    /// Name of the winning class.
    pub label: String,
    /// Winning probability as a percentage in [0, 100].
    pub confidence: f32,
}

/// Maps model probability vectors onto a fixed label table.
#[derive(Debug, Clone)]
pub struct Classifier {
    labels: LabelSet,
    /// Expected input size as (width, height).
    input_shape: (u32, u32),
}

impl Classifier {
    /// Creates a classifier for the given label table and model input shape.
    pub fn new(labels: LabelSet, input_shape: (u32, u32)) -> Self {
        Self {
            labels,
            input_shape,
        }
    }

    /// Returns the label table this classifier maps onto.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Runs one inference pass and derives the winning label and confidence.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor shape does not match the model input
    /// shape, if the model invocation fails, or if the returned vector length
    /// does not match the label table. All of these are fatal for this file
    /// only; the caller skips the file and continues.
    pub fn classify(
        &self,
        tensor: &Tensor3D,
        model: &dyn TrainedModel,
        filename: &str,
    ) -> ClassifyResult<Prediction> {
        let (width, height) = self.input_shape;
        let expected = [1, height as usize, width as usize];
        if tensor.shape() != expected {
            return Err(ClassifyError::shape_mismatch(
                "Classifier",
                &expected,
                tensor.shape(),
            ));
        }

        let probabilities = model.predict(tensor)?;
        if probabilities.len() != self.labels.len() {
            return Err(ClassifyError::invalid_input(format!(
                "model returned {} probabilities for {} labels",
                probabilities.len(),
                self.labels.len()
            )));
        }

        self.audit_distribution(filename, &probabilities);

        let (class_id, max_probability) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| ClassifyError::invalid_input("empty probability vector"))?;

        let label = self
            .labels
            .get(class_id)
            .ok_or_else(|| {
                ClassifyError::invalid_input(format!("no label for class index {}", class_id))
            })?
            .to_string();

        Ok(Prediction {
            filename: filename.to_string(),
            class_id,
            label,
            confidence: max_probability * 100.0,
        })
    }

    /// Flags probability vectors that break the distribution contract.
    ///
    /// A well-formed model never triggers these; they are surfaced as
    /// warnings instead of errors so a slightly miscalibrated model still
    /// produces a usable run.
    fn audit_distribution(&self, filename: &str, probabilities: &[f32]) {
        if probabilities.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
            warn!(
                "{}: probability vector contains values outside [0, 1]",
                filename
            );
        }

        let sum: f32 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            warn!(
                "{}: probability vector sums to {:.6}, expected ~1.0",
                filename, sum
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    struct FixedModel(Vec<f32>);

    impl TrainedModel for FixedModel {
        fn predict(&self, _input: &Tensor3D) -> ClassifyResult<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    struct FailingModel;

    impl TrainedModel for FailingModel {
        fn predict(&self, _input: &Tensor3D) -> ClassifyResult<Vec<f32>> {
            Err(ClassifyError::invalid_input("model exploded"))
        }
    }

    fn canonical_tensor() -> Tensor3D {
        Array3::zeros((1, 28, 28))
    }

    fn classifier() -> Classifier {
        Classifier::new(LabelSet::fashion_mnist(), (28, 28))
    }

    #[test]
    fn winning_class_maps_to_last_label() {
        let mut probabilities = vec![0.05; 9];
        probabilities.push(0.55);
        let model = FixedModel(probabilities);

        let prediction = classifier()
            .classify(&canonical_tensor(), &model, "a.png")
            .unwrap();

        assert_eq!(prediction.class_id, 9);
        assert_eq!(prediction.label, "Ankle boot");
        assert!((prediction.confidence - 55.0).abs() < 1e-4);
    }

    #[test]
    fn winning_class_maps_to_first_label() {
        let mut probabilities = vec![0.0; 10];
        probabilities[0] = 1.0;
        let model = FixedModel(probabilities);

        let prediction = classifier()
            .classify(&canonical_tensor(), &model, "b.png")
            .unwrap();

        assert_eq!(prediction.class_id, 0);
        assert_eq!(prediction.label, "T-shirt/top");
        assert!((prediction.confidence - 100.0).abs() < 1e-4);
    }

    #[test]
    fn confidence_stays_within_percentage_range() {
        let model = FixedModel(vec![0.1; 10]);
        let prediction = classifier()
            .classify(&canonical_tensor(), &model, "c.png")
            .unwrap();
        assert!((0.0..=100.0).contains(&prediction.confidence));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let model = FixedModel(vec![0.1; 10]);
        let tensor = Array3::zeros((1, 10, 10));

        let result = classifier().classify(&tensor, &model, "d.png");
        assert!(matches!(result, Err(ClassifyError::InvalidInput { .. })));
    }

    #[test]
    fn wrong_length_vector_is_rejected() {
        let model = FixedModel(vec![0.5, 0.5]);
        let result = classifier().classify(&canonical_tensor(), &model, "e.png");
        assert!(matches!(result, Err(ClassifyError::InvalidInput { .. })));
    }

    #[test]
    fn model_failure_propagates() {
        let result = classifier().classify(&canonical_tensor(), &FailingModel, "f.png");
        assert!(result.is_err());
    }
}
