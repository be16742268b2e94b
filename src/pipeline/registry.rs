use std::collections::HashMap;

use super::error::PipelineError;

/// Categorical-to-integer mapping for one field.
///
/// Holds the ordered, de-duplicated vocabulary fixed at training time;
/// a label's code is its position in that ordering. Encoding an unknown
/// label is an error, never a silent default.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl CategoryEncoder {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes = Vec::new();
        let mut codes = HashMap::new();
        for label in labels {
            let label = label.into();
            if !codes.contains_key(&label) {
                codes.insert(label.clone(), classes.len());
                classes.push(label);
            }
        }
        Self { classes, codes }
    }

    /// The ordered vocabulary of known labels.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Exact-match lookup of a label's integer code.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.codes.get(label).copied()
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// One [`CategoryEncoder`] per categorical field, loaded once at startup
/// and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct EncoderRegistry {
    encoders: HashMap<String, CategoryEncoder>,
}

impl EncoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from an artifact's field -> vocabulary map.
    pub fn from_vocabularies(vocabularies: HashMap<String, Vec<String>>) -> Self {
        let encoders = vocabularies
            .into_iter()
            .map(|(field, labels)| (field, CategoryEncoder::new(labels)))
            .collect();
        Self { encoders }
    }

    pub fn insert(&mut self, field: impl Into<String>, encoder: CategoryEncoder) {
        self.encoders.insert(field.into(), encoder);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.encoders.contains_key(field)
    }

    /// The known vocabulary for a field, for presenting choices to the user.
    pub fn vocabulary(&self, field: &str) -> Result<&[String], PipelineError> {
        self.encoders
            .get(field)
            .map(|e| e.classes())
            .ok_or_else(|| PipelineError::UnknownField {
                field: field.to_string(),
            })
    }

    /// Encodes a label to its integer code for the given field.
    pub fn encode(&self, field: &str, label: &str) -> Result<usize, PipelineError> {
        let encoder = self
            .encoders
            .get(field)
            .ok_or_else(|| PipelineError::UnknownField {
                field: field.to_string(),
            })?;
        encoder.encode(label).ok_or_else(|| PipelineError::UnknownLabel {
            field: field.to_string(),
            label: label.to_string(),
        })
    }

    /// Field names with a registered encoder, sorted for stable display.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<_> = self.encoders.keys().map(String::as_str).collect();
        fields.sort_unstable();
        fields
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}
