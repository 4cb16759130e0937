use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_MODEL: &str = "hr.employee";
pub const DEFAULT_FIELD: &str = "x_studio_employee_arabic_name";
pub const DEFAULT_LABEL: &str = "Arabic";

/// One ORM record as returned by `read`, keys in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn field_names(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// The record's `id`, if it is a non-zero integer.
    pub fn id(&self) -> Option<i64> {
        self.data
            .get("id")
            .and_then(Value::as_i64)
            .filter(|id| *id != 0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

/// Which field on which model the probe looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub model: String,
    pub field: String,
    /// Human name of the field, used in report headings and trigger phrases.
    pub label: String,
}

impl Default for ProbeTarget {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            field: DEFAULT_FIELD.to_string(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllFieldsCheck {
    Passed {
        count: usize,
        fields: Vec<String>,
        has_target_field: bool,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldCheck {
    Passed { data: Record, value: Value },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeTests {
    pub all_available_fields: AllFieldsCheck,
    pub field_specific: FieldCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_related_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldProbeResult {
    pub employee_id: i64,
    pub model: String,
    pub field: String,
    pub checked_at: DateTime<Utc>,
    pub tests: ProbeTests,
}

/// What a probe invocation produced: a refusal message or a full result.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Unavailable(String),
    Completed(Box<FieldProbeResult>),
}
