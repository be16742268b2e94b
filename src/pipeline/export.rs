use super::predictor::PredictionResult;
use super::record::{FieldValue, InputRecord};

/// Renders a numeric value the way the exported table expects it:
/// integral values without a decimal point.
pub(crate) fn fmt_number(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// The raw input fields combined with the prediction, ready for download.
///
/// Created only after a successful prediction and discarded after the
/// download is offered.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    columns: Vec<(String, String)>,
}

impl ExportRecord {
    pub fn new(record: &InputRecord, result: &PredictionResult) -> Self {
        let mut columns: Vec<(String, String)> = record
            .fields()
            .map(|(spec, value)| {
                let rendered = match value {
                    FieldValue::Number(n) => fmt_number(*n),
                    FieldValue::Label(label) => label.clone(),
                };
                (spec.name.to_string(), rendered)
            })
            .collect();
        columns.push(("Prediction".to_string(), result.outcome.as_str().to_string()));
        columns.push(("Confidence".to_string(), result.confidence_percent()));
        Self { columns }
    }

    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    /// Serializes to UTF-8 CSV bytes: one header row, one data row.
    pub fn to_csv(&self) -> Vec<u8> {
        let header: Vec<String> = self.columns.iter().map(|(name, _)| csv_escape(name)).collect();
        let row: Vec<String> = self.columns.iter().map(|(_, value)| csv_escape(value)).collect();
        format!("{}\n{}\n", header.join(","), row.join(",")).into_bytes()
    }
}

/// Combines one record and its prediction into downloadable CSV bytes.
///
/// Deterministic and pure; the caller must not invoke this without a
/// successful prediction in hand.
pub fn export(record: &InputRecord, result: &PredictionResult) -> Vec<u8> {
    ExportRecord::new(record, result).to_csv()
}
