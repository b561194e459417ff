use std::cell::Cell;

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn into_result(self, method: &str) -> Result<Value, String> {
        if let Some(error) = self.error {
            return Err(format!(
                "{} failed with RPC error {}: {}",
                method, error.code, error.message
            ));
        }
        self.result
            .ok_or_else(|| format!("{} returned neither result nor error", method))
    }
}

/// JSON-RPC 2.0 client over HTTP POST
pub struct RpcClient {
    url: String,
    next_id: Cell<u64>,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            next_id: Cell::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request(&self, method: &str, params: Value) -> Result<Value, String> {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = Request::post(&self.url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(format!("{} failed: HTTP {}", method, response.status()));
        }

        response
            .json::<JsonRpcResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?
            .into_result(method)
    }
}
