use std::collections::HashMap;
use std::fmt;

use super::error::PipelineError;
use super::schema::{self, FieldKind, FieldSpec};

/// A raw value supplied for one field: a number for numeric fields,
/// a label string for categorical fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f32),
    Label(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Label(s) => Some(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", super::export::fmt_number(*n)),
            Self::Label(s) => write!(f, "{}", s),
        }
    }
}

/// An immutable snapshot of one customer's raw attribute values.
///
/// Created fresh per prediction request and never persisted. Fields are
/// validated against the schema at construction; a field left unset is
/// caught downstream by column alignment, not here.
#[derive(Debug, Clone)]
pub struct InputRecord {
    values: HashMap<String, FieldValue>,
}

impl InputRecord {
    pub fn builder() -> InputRecordBuilder {
        InputRecordBuilder::new()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the fields present in this record, in export order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> {
        schema::SCHEMA
            .iter()
            .filter_map(|spec| self.values.get(spec.name).map(|v| (spec, v)))
    }
}

/// Builds an [`InputRecord`] while validating field names, kinds, and ranges.
#[derive(Default, Debug)]
pub struct InputRecordBuilder {
    values: HashMap<String, FieldValue>,
}

impl InputRecordBuilder {
    pub fn new() -> Self {
        Self { values: HashMap::new() }
    }

    /// Sets a raw value for a recognized field.
    ///
    /// Fails with `UnknownField` for a name outside the schema, and with
    /// `Validation` when the value does not fit the field's kind (a label
    /// for a numeric field, a non-integer or out-of-range value for a
    /// bounded field).
    pub fn set(mut self, field: &str, value: FieldValue) -> Result<Self, PipelineError> {
        let spec = schema::field(field).ok_or_else(|| PipelineError::UnknownField {
            field: field.to_string(),
        })?;

        match (&spec.kind, &value) {
            (FieldKind::Categorical, FieldValue::Label(_)) => {}
            (FieldKind::Unbounded { .. }, FieldValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(PipelineError::Validation(format!(
                        "'{}' must be a finite number",
                        field
                    )));
                }
            }
            (FieldKind::BoundedInt { min, max, .. }, FieldValue::Number(n)) => {
                if !n.is_finite() || n.fract() != 0.0 {
                    return Err(PipelineError::Validation(format!(
                        "'{}' must be a whole number",
                        field
                    )));
                }
                let n = *n as i64;
                if n < *min as i64 || n > *max as i64 {
                    return Err(PipelineError::Validation(format!(
                        "'{}' must be between {} and {}, got {}",
                        field, min, max, n
                    )));
                }
            }
            (FieldKind::Categorical, FieldValue::Number(_)) => {
                return Err(PipelineError::Validation(format!(
                    "'{}' expects a label, got a number",
                    field
                )));
            }
            (_, FieldValue::Label(_)) => {
                return Err(PipelineError::Validation(format!(
                    "'{}' expects a number, got a label",
                    field
                )));
            }
        }

        self.values.insert(field.to_string(), value);
        Ok(self)
    }

    pub fn set_number(self, field: &str, value: f32) -> Result<Self, PipelineError> {
        self.set(field, FieldValue::Number(value))
    }

    pub fn set_label(self, field: &str, label: impl Into<String>) -> Result<Self, PipelineError> {
        self.set(field, FieldValue::Label(label.into()))
    }

    pub fn build(self) -> InputRecord {
        InputRecord { values: self.values }
    }
}
