use ndarray::Array1;

use super::error::PipelineError;
use super::record::{FieldValue, InputRecord};
use super::registry::EncoderRegistry;
use super::schema::SCHEMA;

/// The numeric array, in model-required column order, that is the sole
/// input to the classifier.
pub type FeatureVector = Array1<f32>;

/// A record after categorical encoding, still keyed by field name and
/// in export order. Kept around for the debugging display before the
/// columns are aligned to the model.
#[derive(Debug, Clone)]
pub struct EncodedRecord {
    columns: Vec<(String, f32)>,
}

impl EncodedRecord {
    pub fn columns(&self) -> &[(String, f32)] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, v)| *v)
    }
}

/// Replaces every categorical value with its integer code.
///
/// Numeric fields pass through unchanged. A categorical field without a
/// registered encoder is an artifact mismatch (`MissingEncoder`), distinct
/// from a label outside the vocabulary (`UnknownLabel`).
pub(crate) fn encode_record(
    record: &InputRecord,
    registry: &EncoderRegistry,
) -> Result<EncodedRecord, PipelineError> {
    let mut columns = Vec::with_capacity(SCHEMA.len());
    for (spec, value) in record.fields() {
        let encoded = match value {
            FieldValue::Number(n) => *n,
            FieldValue::Label(label) => {
                if !registry.contains(spec.name) {
                    return Err(PipelineError::MissingEncoder {
                        field: spec.name.to_string(),
                    });
                }
                registry.encode(spec.name, label)? as f32
            }
        };
        columns.push((spec.name.to_string(), encoded));
    }
    Ok(EncodedRecord { columns })
}

/// Selects and reorders the encoded columns to exactly match the model's
/// expected column list. Any absent expected column aborts with
/// `ColumnAlignment`; no partial vector is produced.
pub(crate) fn align(
    encoded: &EncodedRecord,
    feature_names: &[String],
) -> Result<FeatureVector, PipelineError> {
    let mut values = Vec::with_capacity(feature_names.len());
    for column in feature_names {
        let value = encoded
            .get(column)
            .ok_or_else(|| PipelineError::ColumnAlignment {
                column: column.clone(),
            })?;
        values.push(value);
    }
    Ok(Array1::from(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::record::InputRecord;
    use crate::pipeline::registry::{CategoryEncoder, EncoderRegistry};

    fn small_registry() -> EncoderRegistry {
        let mut registry = EncoderRegistry::new();
        registry.insert("job", CategoryEncoder::new(["admin.", "technician"]));
        registry
    }

    #[test]
    fn test_encodes_labels_and_passes_numbers_through() {
        let record = InputRecord::builder()
            .set_number("age", 30.0)
            .unwrap()
            .set_label("job", "technician")
            .unwrap()
            .build();
        let encoded = encode_record(&record, &small_registry()).unwrap();
        assert_eq!(encoded.get("age"), Some(30.0));
        assert_eq!(encoded.get("job"), Some(1.0));
    }

    #[test]
    fn test_missing_encoder_is_distinct_from_unknown_label() {
        let record = InputRecord::builder()
            .set_label("job", "admin.")
            .unwrap()
            .set_label("marital", "married")
            .unwrap()
            .build();

        let result = encode_record(&record, &small_registry());
        assert!(matches!(
            result,
            Err(PipelineError::MissingEncoder { ref field }) if field == "marital"
        ));

        let record = InputRecord::builder()
            .set_label("job", "astronaut")
            .unwrap()
            .build();
        let result = encode_record(&record, &small_registry());
        assert!(matches!(
            result,
            Err(PipelineError::UnknownLabel { ref field, .. }) if field == "job"
        ));
    }

    #[test]
    fn test_alignment_follows_model_order() {
        let record = InputRecord::builder()
            .set_number("age", 30.0)
            .unwrap()
            .set_number("duration", 300.0)
            .unwrap()
            .build();
        let encoded = encode_record(&record, &small_registry()).unwrap();
        let vector = align(&encoded, &["duration".to_string(), "age".to_string()]).unwrap();
        assert_eq!(vector.to_vec(), vec![300.0, 30.0]);
    }

    #[test]
    fn test_absent_expected_column_aborts() {
        let record = InputRecord::builder().set_number("age", 30.0).unwrap().build();
        let encoded = encode_record(&record, &small_registry()).unwrap();
        let result = align(&encoded, &["age".to_string(), "contact_type".to_string()]);
        assert!(matches!(
            result,
            Err(PipelineError::ColumnAlignment { ref column }) if column == "contact_type"
        ));
    }
}
