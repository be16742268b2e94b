mod encoding;
mod error;
mod export;
mod forest;
mod predictor;
mod record;
mod registry;
mod schema;
pub mod builder;

pub use encoding::{EncodedRecord, FeatureVector};
pub use error::PipelineError;
pub use export::{export, ExportRecord};
pub use forest::{DecisionTree, ForestModel, TreeNode};
pub use predictor::{Outcome, PredictionResult, Predictor};
pub use record::{FieldValue, InputRecord, InputRecordBuilder};
pub use registry::{CategoryEncoder, EncoderRegistry};
pub use schema::{field, position, FieldKind, FieldSpec, SCHEMA};
pub use builder::PredictorBuilder;

/// Information about the artifacts a predictor was built from
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Path to the model artifact, when loaded from a file
    pub model_path: Option<String>,
    /// Path to the encoder artifact, when loaded from a file
    pub encoders_path: Option<String>,
    /// The column order the model expects
    pub expected_columns: Vec<String>,
    /// Fields with a registered encoder
    pub encoder_fields: Vec<String>,
    /// Number of trees in the loaded forest
    pub tree_count: usize,
}
