use crate::core::session::Session;
use crate::domain::model::Record;
use crate::domain::ports::OdooRpc;
use crate::utils::error::Result;
use serde_json::{json, Value};

pub const EMPLOYEE_MODEL: &str = "hr.employee";
pub const USER_MODEL: &str = "res.users";

pub const EMPLOYEE_BASIC_FIELDS: &[&str] =
    &["name", "job_title", "work_email", "work_phone", "department_id"];
const USER_FIELDS: &[&str] = &["name", "email", "partner_id", "employee_id", "employee_ids"];

/// Id of a many2one value, which Odoo sends as `[id, "display name"]`, a bare id, or `false`.
pub fn many2one_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Array(items) => items.first().and_then(Value::as_i64),
        other => other.as_i64(),
    };
    id.filter(|id| *id > 0)
}

pub async fn load_employee(rpc: &dyn OdooRpc, employee_id: i64) -> Result<Option<Record>> {
    let records = rpc
        .read(EMPLOYEE_MODEL, &[employee_id], Some(EMPLOYEE_BASIC_FIELDS))
        .await?;
    Ok(records.into_iter().next())
}

async fn search_one(
    rpc: &dyn OdooRpc,
    field: &str,
    operator: &str,
    value: &str,
) -> Result<Option<i64>> {
    let ids = rpc
        .search(EMPLOYEE_MODEL, json!([[field, operator, value]]), Some(1))
        .await?;
    Ok(ids.into_iter().next())
}

/// Finds the employee linked to `user`: explicit link first, then email, then name.
async fn employee_id_for_user(rpc: &dyn OdooRpc, user: &Record) -> Result<Option<i64>> {
    if let Some(id) = user.get("employee_id").and_then(many2one_id) {
        return Ok(Some(id));
    }

    if let Some(id) = user
        .get("employee_ids")
        .and_then(Value::as_array)
        .and_then(|ids| ids.first())
        .and_then(Value::as_i64)
    {
        return Ok(Some(id));
    }

    if let Some(email) = user.get("email").and_then(Value::as_str).filter(|e| !e.is_empty()) {
        if let Some(id) = search_one(rpc, "work_email", "=", email).await? {
            tracing::debug!("Matched employee {} by work email", id);
            return Ok(Some(id));
        }
    }

    if let Some(name) = user.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) {
        if let Some(id) = search_one(rpc, "name", "ilike", name).await? {
            tracing::debug!("Matched employee {} by name", id);
            return Ok(Some(id));
        }
    }

    Ok(None)
}

async fn resolve_current_employee(
    session: &mut Session,
    rpc: &dyn OdooRpc,
    uid: i64,
) -> Result<Option<Record>> {
    let users = rpc.read(USER_MODEL, &[uid], Some(USER_FIELDS)).await?;
    let Some(user) = users.into_iter().next() else {
        return Ok(None);
    };
    session.debug_info_mut().insert("current_user", &user)?;

    match employee_id_for_user(rpc, &user).await? {
        Some(id) => load_employee(rpc, id).await,
        None => Ok(None),
    }
}

impl Session {
    /// Reads one employee by id into the session.
    pub async fn load_employee(&mut self, employee_id: i64) -> Result<Option<&Record>> {
        let Some(rpc) = self.rpc().cloned() else {
            return Ok(None);
        };
        let employee = load_employee(rpc.as_ref(), employee_id).await?;
        self.set_employee(employee);
        Ok(self.employee())
    }

    /// Resolves the employee behind Odoo user `uid`. Failures are kept in the debug cache.
    pub async fn load_current_employee(&mut self, uid: i64) -> Option<&Record> {
        let rpc = self.rpc().cloned()?;
        match resolve_current_employee(self, rpc.as_ref(), uid).await {
            Ok(employee) => {
                if employee.is_none() {
                    tracing::warn!("No employee record linked to user {}", uid);
                }
                self.set_employee(employee);
            }
            Err(e) => {
                tracing::error!("Error retrieving current user data: {}", e);
                let _ = self
                    .debug_info_mut()
                    .insert("current_user_error", &e.to_string());
                self.set_employee(None);
            }
        }
        self.employee()
    }
}
