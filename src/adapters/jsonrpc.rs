use crate::domain::ports::OdooRpc;
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: CallParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
struct CallParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<JsonRpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorData {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<JsonRpcError> for ProbeError {
    fn from(error: JsonRpcError) -> Self {
        // Odoo puts the useful text in `data`; the top-level message is usually "Odoo Server Error".
        let message = match error.data {
            Some(JsonRpcErrorData {
                name: Some(name),
                message: Some(message),
            }) => format!("{}: {}", name, message),
            Some(JsonRpcErrorData {
                message: Some(message),
                ..
            }) => message,
            _ => error.message,
        };
        ProbeError::RemoteFault {
            code: error.code,
            message,
        }
    }
}

/// Raw `call` requests against `{base}/jsonrpc`.
#[derive(Debug)]
pub struct JsonRpcTransport {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/jsonrpc", base_url.trim_end_matches('/')),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn call(&self, service: &str, method: &str, args: Vec<Value>) -> Result<Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "call",
            params: CallParams {
                service,
                method,
                args,
            },
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        tracing::debug!("JSON-RPC {}.{} -> {}", service, method, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: JsonRpcResponse = response.json().await?;
        match (body.result, body.error) {
            (_, Some(error)) => {
                let err = ProbeError::from(error);
                tracing::debug!("JSON-RPC {}.{} failed: {}", service, method, err);
                Err(err)
            }
            (Some(result), None) => Ok(result),
            (None, None) => Err(ProbeError::InvalidResponse {
                message: format!("{}.{} returned neither result nor error", service, method),
            }),
        }
    }
}

/// An authenticated Odoo session over JSON-RPC.
pub struct OdooClient {
    transport: JsonRpcTransport,
    database: String,
    uid: i64,
    password: String,
    server_version: Option<String>,
}

impl OdooClient {
    /// Checks the server answers `version`, then authenticates.
    pub async fn connect(
        base_url: &str,
        database: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let transport = JsonRpcTransport::new(base_url, timeout)?;

        let version = transport.call("common", "version", vec![]).await?;
        let server_version = version
            .get("server_version")
            .and_then(Value::as_str)
            .map(str::to_string);

        let uid = transport
            .call(
                "common",
                "authenticate",
                vec![json!(database), json!(username), json!(password), json!({})],
            )
            .await?;

        // A rejected login comes back as `false`, not as an error.
        let uid = match uid.as_i64() {
            Some(uid) if uid > 0 => uid,
            _ => {
                return Err(ProbeError::AuthenticationFailed {
                    database: database.to_string(),
                    username: username.to_string(),
                })
            }
        };

        tracing::info!(
            "Connected to Odoo at {} as uid {}{}",
            transport.endpoint(),
            uid,
            server_version
                .as_deref()
                .map(|v| format!(" (version {})", v))
                .unwrap_or_default()
        );

        Ok(Self {
            transport,
            database: database.to_string(),
            uid,
            password: password.to_string(),
            server_version,
        })
    }

    pub fn uid(&self) -> i64 {
        self.uid
    }

    pub fn server_version(&self) -> Option<&str> {
        self.server_version.as_deref()
    }
}

impl std::fmt::Debug for OdooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdooClient")
            .field("endpoint", &self.transport.endpoint())
            .field("database", &self.database)
            .field("uid", &self.uid)
            .field("server_version", &self.server_version)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OdooRpc for OdooClient {
    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<Value> {
        self.transport
            .call(
                "object",
                "execute_kw",
                vec![
                    json!(self.database),
                    json!(self.uid),
                    json!(self.password),
                    json!(model),
                    json!(method),
                    args,
                    kwargs,
                ],
            )
            .await
    }
}
