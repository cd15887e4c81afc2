//! Classifier seam and arg-max labelling
//!
//! The model itself is opaque: anything that turns a spectrogram into a
//! probability vector can sit behind [`Classifier`].

use crate::error::{AnalysisError, Result};
use crate::image_data::SpectrogramImage;
use crate::labels::ClassLabels;
use crate::types::ClassificationResult;

/// Common interface for single-image classifiers
pub trait Classifier: Send {
    /// Probability (or logit) per class for one image
    fn predict(&mut self, image: &SpectrogramImage) -> Result<Vec<f32>>;

    /// Get the classifier name (for logging/debugging)
    fn name(&self) -> &str;

    /// Get the input size expected by the classifier
    fn input_size(&self) -> (u32, u32);
}

/// Adapts a closure into a [`Classifier`]
pub struct FnClassifier<F> {
    name: String,
    input_size: (u32, u32),
    predict_fn: F,
}

impl<F> FnClassifier<F>
where
    F: FnMut(&SpectrogramImage) -> Result<Vec<f32>> + Send,
{
    pub fn new(name: impl Into<String>, input_size: (u32, u32), predict_fn: F) -> Self {
        Self {
            name: name.into(),
            input_size,
            predict_fn,
        }
    }
}

impl<F> Classifier for FnClassifier<F>
where
    F: FnMut(&SpectrogramImage) -> Result<Vec<f32>> + Send,
{
    fn predict(&mut self, image: &SpectrogramImage) -> Result<Vec<f32>> {
        (self.predict_fn)(image)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn input_size(&self) -> (u32, u32) {
        self.input_size
    }
}

/// Index and value of the largest entry; the first one wins on ties
pub fn argmax(values: &[f32]) -> Result<(usize, f32)> {
    if values.is_empty() {
        return Err(AnalysisError::inference("Classifier returned no outputs"));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::inference(format!(
            "Non-finite classifier output at index {}: {}",
            i, values[i]
        )));
    }

    let mut best = (0, values[0]);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best.1 {
            best = (i, v);
        }
    }
    Ok(best)
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Run the classifier and label its arg-max output
pub fn classify(
    classifier: &mut dyn Classifier,
    labels: &ClassLabels,
    image: &SpectrogramImage,
    apply_softmax: bool,
) -> Result<ClassificationResult> {
    let raw = classifier.predict(image)?;
    let probabilities = if apply_softmax { softmax(&raw) } else { raw };

    if probabilities.len() != labels.len() {
        log::warn!(
            "{} produced {} outputs but {} class labels are loaded",
            classifier.name(),
            probabilities.len(),
            labels.len()
        );
    }

    let (index, confidence) = argmax(&probabilities)?;
    let predicted_class = labels.label_for(index);
    log::debug!(
        "{} predicted {} (index {}, confidence {:.4})",
        classifier.name(),
        predicted_class,
        index,
        confidence
    );

    Ok(ClassificationResult {
        predicted_class,
        confidence,
    })
}
