use std::fmt;

/// Represents the different types of errors that can occur in the prediction pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// The named field is not part of the input schema or has no registered encoder entry
    UnknownField { field: String },
    /// The label is not in the field's training-time vocabulary
    UnknownLabel { field: String, label: String },
    /// A categorical field has no registered encoder at all (artifact mismatch, not bad input)
    MissingEncoder { field: String },
    /// A column the model expects is absent from the encoded record
    ColumnAlignment { column: String },
    /// Error occurred while constructing the predictor
    Build(String),
    /// Error raised by the underlying model while classifying
    Prediction(String),
    /// Error occurred due to invalid input values
    Validation(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { field } => write!(f, "Unknown field: '{}'", field),
            Self::UnknownLabel { field, label } => {
                write!(f, "Encoding error in '{}': label '{}' is not in the vocabulary", field, label)
            }
            Self::MissingEncoder { field } => write!(f, "Missing encoder for: '{}'", field),
            Self::ColumnAlignment { column } => {
                write!(f, "Column alignment failed: expected column '{}' is absent", column)
            }
            Self::Build(msg) => write!(f, "Build error: {}", msg),
            Self::Prediction(msg) => write!(f, "Prediction failed: {}", msg),
            Self::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}
