use std::collections::HashMap;

use lazy_static::lazy_static;

/// How a recognized field is collected and encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Integer-valued attribute restricted to an inclusive range
    BoundedInt { min: i32, max: i32, default: i32 },
    /// Free numeric attribute with a suggested default
    Unbounded { default: f32 },
    /// Label drawn from a fixed vocabulary learned at training time
    Categorical,
}

/// One recognized customer attribute: its wire name, its prompt label,
/// and the kind that drives collection, validation, and encoding.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, FieldKind::Categorical)
    }
}

/// The recognized fields, in the order they are exported.
pub const SCHEMA: [FieldSpec; 16] = [
    FieldSpec { name: "age", label: "Age", kind: FieldKind::BoundedInt { min: 18, max: 95, default: 30 } },
    FieldSpec { name: "job", label: "Job", kind: FieldKind::Categorical },
    FieldSpec { name: "marital", label: "Marital Status", kind: FieldKind::Categorical },
    FieldSpec { name: "education", label: "Education", kind: FieldKind::Categorical },
    FieldSpec { name: "default", label: "Has Credit in Default?", kind: FieldKind::Categorical },
    FieldSpec { name: "balance", label: "Account Balance", kind: FieldKind::Unbounded { default: 1000.0 } },
    FieldSpec { name: "housing", label: "Has Housing Loan?", kind: FieldKind::Categorical },
    FieldSpec { name: "loan", label: "Has Personal Loan?", kind: FieldKind::Categorical },
    FieldSpec { name: "contact", label: "Contact Communication Type", kind: FieldKind::Categorical },
    FieldSpec { name: "day", label: "Last Contact Day of Month", kind: FieldKind::BoundedInt { min: 1, max: 31, default: 15 } },
    FieldSpec { name: "month", label: "Last Contact Month", kind: FieldKind::Categorical },
    FieldSpec { name: "duration", label: "Call Duration (in seconds)", kind: FieldKind::BoundedInt { min: 0, max: 3000, default: 300 } },
    FieldSpec { name: "campaign", label: "Number of Contacts During Campaign", kind: FieldKind::BoundedInt { min: 1, max: 50, default: 1 } },
    FieldSpec { name: "pdays", label: "Days Since Last Contact", kind: FieldKind::BoundedInt { min: -1, max: 999, default: -1 } },
    FieldSpec { name: "previous", label: "Previous Contacts", kind: FieldKind::BoundedInt { min: 0, max: 10, default: 0 } },
    FieldSpec { name: "poutcome", label: "Outcome of Previous Campaign", kind: FieldKind::Categorical },
];

lazy_static! {
    static ref SCHEMA_INDEX: HashMap<&'static str, usize> = SCHEMA
        .iter()
        .enumerate()
        .map(|(i, spec)| (spec.name, i))
        .collect();
}

/// Looks up a field spec by wire name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    SCHEMA_INDEX.get(name).map(|&i| &SCHEMA[i])
}

/// Position of a field in export order.
pub fn position(name: &str) -> Option<usize> {
    SCHEMA_INDEX.get(name).copied()
}
