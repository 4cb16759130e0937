use crate::domain::model::{ProbeTarget, Record};
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

/// The one remote seam: Odoo's `execute_kw` plus the two helpers built on it.
#[async_trait]
pub trait OdooRpc: Send + Sync {
    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<Value>;

    /// `fields: None` asks for every field the caller may read.
    async fn read(
        &self,
        model: &str,
        ids: &[i64],
        fields: Option<&[&str]>,
    ) -> Result<Vec<Record>> {
        let kwargs = match fields {
            Some(fields) => json!({ "fields": fields }),
            None => json!({}),
        };
        let value = self.execute_kw(model, "read", json!([ids]), kwargs).await?;
        serde_json::from_value(value).map_err(|e| ProbeError::InvalidResponse {
            message: format!("{}.read did not return a list of records: {}", model, e),
        })
    }

    async fn search(
        &self,
        model: &str,
        domain: Value,
        limit: Option<usize>,
    ) -> Result<Vec<i64>> {
        let kwargs = match limit {
            Some(limit) => json!({ "limit": limit }),
            None => json!({}),
        };
        let value = self.execute_kw(model, "search", json!([domain]), kwargs).await?;
        serde_json::from_value(value).map_err(|e| ProbeError::InvalidResponse {
            message: format!("{}.search did not return a list of ids: {}", model, e),
        })
    }
}

pub trait ConfigProvider: Send + Sync {
    fn odoo_url(&self) -> &str;
    fn database(&self) -> &str;
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn target(&self) -> ProbeTarget;
}
