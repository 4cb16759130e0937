use crate::domain::model::Record;
use crate::domain::ports::OdooRpc;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Named snapshots kept for the host's debug view. Writing a key replaces it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DebugInfo {
    entries: Map<String, Value>,
}

impl DebugInfo {
    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

/// Per-conversation state the host hands to command handlers.
#[derive(Default)]
pub struct Session {
    rpc: Option<Arc<dyn OdooRpc>>,
    employee: Option<Record>,
    debug_info: DebugInfo,
}

impl Session {
    pub fn connected(rpc: Arc<dyn OdooRpc>) -> Self {
        Self {
            rpc: Some(rpc),
            ..Self::default()
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn rpc(&self) -> Option<&Arc<dyn OdooRpc>> {
        self.rpc.as_ref()
    }

    pub fn employee(&self) -> Option<&Record> {
        self.employee.as_ref()
    }

    pub fn set_employee(&mut self, employee: Option<Record>) {
        self.employee = employee;
    }

    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug_info
    }

    pub fn debug_info_mut(&mut self) -> &mut DebugInfo {
        &mut self.debug_info
    }
}
