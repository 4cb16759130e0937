use crate::domain::model::{
    AllFieldsCheck, FieldCheck, FieldProbeResult, ProbeTarget, ProbeTests, Record,
};
use crate::domain::ports::OdooRpc;
use crate::utils::error::Result;
use chrono::Utc;
use serde_json::Value;

const NO_DATA: &str = "No data returned";

/// Runs the two reads that decide whether `target.field` is readable on one record.
pub struct FieldProbe<'a> {
    rpc: &'a dyn OdooRpc,
    target: &'a ProbeTarget,
}

impl<'a> FieldProbe<'a> {
    pub fn new(rpc: &'a dyn OdooRpc, target: &'a ProbeTarget) -> Self {
        Self { rpc, target }
    }

    /// Never fails: each remote error is captured in the check it belongs to.
    pub async fn run(&self, record_id: i64) -> FieldProbeResult {
        tracing::info!(
            "Probing {}.{} on record {}",
            self.target.model,
            self.target.field,
            record_id
        );

        let all_available_fields = self.check_all_fields(record_id).await;
        let field_specific = self.check_field(record_id).await;

        let name_related_fields = match &all_available_fields {
            AllFieldsCheck::Passed { fields, .. } => Some(self.name_related(fields)),
            AllFieldsCheck::Failed { .. } => None,
        };

        FieldProbeResult {
            employee_id: record_id,
            model: self.target.model.clone(),
            field: self.target.field.clone(),
            checked_at: Utc::now(),
            tests: ProbeTests {
                all_available_fields,
                field_specific,
                name_related_fields,
            },
        }
    }

    async fn check_all_fields(&self, record_id: i64) -> AllFieldsCheck {
        match self.read_first(record_id, None).await {
            Ok(Some(record)) => {
                let fields = record.field_names();
                let has_target_field = fields.iter().any(|f| *f == self.target.field);
                tracing::debug!(
                    "{} readable fields, target present: {}",
                    fields.len(),
                    has_target_field
                );
                AllFieldsCheck::Passed {
                    count: fields.len(),
                    fields,
                    has_target_field,
                }
            }
            Ok(None) => AllFieldsCheck::Failed {
                error: NO_DATA.to_string(),
            },
            Err(e) => {
                tracing::warn!("All-fields read failed: {}", e);
                AllFieldsCheck::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn check_field(&self, record_id: i64) -> FieldCheck {
        let fields = [self.target.field.as_str()];
        match self.read_first(record_id, Some(&fields[..])).await {
            Ok(Some(record)) => {
                let value = record.get(&self.target.field).cloned().unwrap_or(Value::Null);
                FieldCheck::Passed {
                    data: record,
                    value,
                }
            }
            Ok(None) => FieldCheck::Failed {
                error: NO_DATA.to_string(),
            },
            Err(e) => {
                tracing::warn!("Read of {} failed: {}", self.target.field, e);
                FieldCheck::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn read_first(&self, record_id: i64, fields: Option<&[&str]>) -> Result<Option<Record>> {
        let records = self
            .rpc
            .read(&self.target.model, &[record_id], fields)
            .await?;
        Ok(records.into_iter().next())
    }

    fn name_related(&self, fields: &[String]) -> Vec<String> {
        let label = self.target.label.to_lowercase();
        fields
            .iter()
            .filter(|f| {
                let lower = f.to_lowercase();
                lower.contains(&label) || lower.contains("name")
            })
            .cloned()
            .collect()
    }
}
