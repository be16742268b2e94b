use std::fmt;
use std::sync::Arc;

use log::debug;

use super::encoding::{align, encode_record, EncodedRecord, FeatureVector};
use super::error::PipelineError;
use super::forest::ForestModel;
use super::record::InputRecord;
use super::registry::EncoderRegistry;

/// The predicted class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one classification.
///
/// `confidence` is always the estimated probability of the positive
/// (subscribe) class, independent of which label was chosen. A 0.20
/// positive probability yields label No with confidence 0.20, not 0.80.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub outcome: Outcome,
    pub confidence: f32,
}

impl PredictionResult {
    /// The confidence rendered as a percentage with two decimal places,
    /// e.g. `73.42%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// A thread-safe term-deposit subscription predictor.
///
/// Holds the process-wide read-only artifacts: the encoder registry and
/// the trained forest. Both are behind `Arc`, so the predictor can be
/// shared across threads without locking; nothing mutates them after
/// construction.
#[derive(Debug)]
pub struct Predictor {
    pub model_path: Option<String>,
    pub encoders_path: Option<String>,
    pub registry: Arc<EncoderRegistry>,
    pub model: Arc<ForestModel>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Predictor>();
    }
};

impl Predictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the predictor's loaded artifacts
    pub fn info(&self) -> super::PredictorInfo {
        super::PredictorInfo {
            model_path: self.model_path.clone(),
            encoders_path: self.encoders_path.clone(),
            expected_columns: self.model.feature_names().to_vec(),
            encoder_fields: self.registry.fields().iter().map(|f| f.to_string()).collect(),
            tree_count: self.model.tree_count(),
        }
    }

    /// The encoder registry, for presenting vocabularies to the user.
    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    /// Encodes a record's categorical values without running the model.
    ///
    /// The result keeps field names and export order, which is what the
    /// "show encoded input" debugging view displays.
    pub fn encode(&self, record: &InputRecord) -> Result<EncodedRecord, PipelineError> {
        encode_record(record, &self.registry)
    }

    /// Runs the full pipeline for one record: encode, align to the
    /// model's column order, classify.
    ///
    /// Every failure is terminal for this single request only; the
    /// loaded artifacts remain valid for the next one.
    pub fn predict(&self, record: &InputRecord) -> Result<PredictionResult, PipelineError> {
        let encoded = self.encode(record)?;
        let vector = align(&encoded, self.model.feature_names())?;
        self.classify(&vector)
    }

    /// Classifies an already-aligned feature vector.
    ///
    /// The label is Yes exactly when the model's decision is positive;
    /// the confidence is P(positive) regardless of the label.
    pub fn classify(&self, vector: &FeatureVector) -> Result<PredictionResult, PipelineError> {
        let features = vector.as_slice().ok_or_else(|| {
            PipelineError::Prediction("feature vector is not contiguous".to_string())
        })?;
        let decision = self.model.predict(features)?;
        let proba = self.model.predict_proba(features)?;
        let outcome = if decision == 1 { Outcome::Yes } else { Outcome::No };
        debug!("classified decision={} p_positive={:.4}", decision, proba[1]);
        Ok(PredictionResult { outcome, confidence: proba[1] })
    }

    /// Column name -> relative importance, in the model's column order.
    pub fn feature_importances(&self) -> Vec<(String, f32)> {
        self.model
            .feature_names()
            .iter()
            .cloned()
            .zip(self.model.importances().iter().copied())
            .collect()
    }
}
