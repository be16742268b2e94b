//! A thread-safe term-deposit subscription predictor for bank marketing
//! campaigns, built on a persisted random-forest artifact and its
//! training-time label encoders.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use teller::{
//!     CategoryEncoder, DecisionTree, EncoderRegistry, ForestModel, InputRecord, Predictor,
//!     TreeNode,
//! };
//!
//! let model = ForestModel::new(
//!     vec!["age".to_string(), "job".to_string()],
//!     vec![DecisionTree {
//!         nodes: vec![
//!             TreeNode { feature: 0, threshold: 40.0, left: 1, right: 2, value: [0.0, 0.0] },
//!             TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: [20.0, 80.0] },
//!             TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: [90.0, 10.0] },
//!         ],
//!     }],
//!     vec![0.7, 0.3],
//! );
//! let mut registry = EncoderRegistry::new();
//! registry.insert("job", CategoryEncoder::new(["admin.", "technician"]));
//!
//! let predictor = Predictor::builder()
//!     .with_artifacts(model, registry)?
//!     .build()?;
//!
//! let record = InputRecord::builder()
//!     .set_number("age", 30.0)?
//!     .set_label("job", "admin.")?
//!     .build();
//!
//! let result = predictor.predict(&record)?;
//! println!("{} ({})", result.outcome, result.confidence_percent());
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The predictor's artifacts are read-only after construction, so it can
//! be shared across threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # use teller::{
//! #     CategoryEncoder, DecisionTree, EncoderRegistry, ForestModel, InputRecord, Predictor,
//! #     TreeNode,
//! # };
//! use std::sync::Arc;
//! use std::thread;
//!
//! # let model = ForestModel::new(
//! #     vec!["age".to_string()],
//! #     vec![DecisionTree {
//! #         nodes: vec![
//! #             TreeNode { feature: 0, threshold: 40.0, left: 1, right: 2, value: [0.0, 0.0] },
//! #             TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: [20.0, 80.0] },
//! #             TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: [90.0, 10.0] },
//! #         ],
//! #     }],
//! #     vec![1.0],
//! # );
//! let predictor = Arc::new(Predictor::builder()
//!     .with_artifacts(model, EncoderRegistry::new())?
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let predictor = Arc::clone(&predictor);
//!     handles.push(thread::spawn(move || {
//!         let record = InputRecord::builder().set_number("age", 30.0).unwrap().build();
//!         predictor.predict(&record).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod models;
pub mod pipeline;

pub use artifacts::{ArtifactError, ArtifactManager};
pub use models::{ArtifactCharacteristics, ArtifactInfo, BuiltinArtifact};
pub use pipeline::{
    export, field, position, CategoryEncoder, DecisionTree, EncodedRecord, EncoderRegistry,
    ExportRecord, FeatureVector, FieldKind, FieldSpec, FieldValue, ForestModel, InputRecord,
    InputRecordBuilder, Outcome, PipelineError, PredictionResult, Predictor, PredictorBuilder,
    PredictorInfo, TreeNode, SCHEMA,
};

pub fn init_logger() {
    env_logger::init();
}
