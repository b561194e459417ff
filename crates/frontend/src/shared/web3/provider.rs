//! Injected wallet provider (`window.ethereum`, EIP-1193)

use alloy_primitives::Address;
use contracts::shared::abi::parse_quantity;
use contracts::shared::ChainId;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Call sent through `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: String,
}

/// Receipt status, `None` while the transaction is not mined yet.
/// Pre-Byzantium receipts carry no status and count as succeeded.
pub fn receipt_succeeded(receipt: &Value) -> Option<bool> {
    if receipt.is_null() {
        return None;
    }
    match receipt.get("status").and_then(Value::as_str) {
        Some(status) => Some(parse_quantity(status).map(|s| s == 1).unwrap_or(false)),
        None => Some(true),
    }
}

#[derive(Clone)]
pub struct Eip1193Provider {
    inner: JsValue,
}

impl Eip1193Provider {
    /// Provider injected by a browser wallet, if any
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let inner = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if inner.is_undefined() || inner.is_null() {
            return None;
        }
        Some(Self { inner })
    }

    /// `provider.request({ method, params })`
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, String> {
        let request_fn = js_sys::Reflect::get(&self.inner, &JsValue::from_str("request"))
            .map_err(|e| format!("Provider has no request method: {:?}", e))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| "provider.request is not a function".to_string())?;

        let args = json!({ "method": method, "params": params })
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| format!("Failed to serialize {} params: {}", method, e))?;

        let promise = request_fn
            .call1(&self.inner, &args)
            .map_err(|e| format!("{} threw: {:?}", method, e))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| format!("{} did not return a promise", method))?;

        let value = JsFuture::from(promise)
            .await
            .map_err(|e| format!("{} rejected: {:?}", method, e))?;

        serde_wasm_bindgen::from_value(value)
            .map_err(|e| format!("Failed to parse {} result: {}", method, e))
    }

    /// Accounts already exposed to this page. Never prompts the user.
    pub async fn accounts(&self) -> Result<Vec<Address>, String> {
        let value = self.request("eth_accounts", json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(value)
            .map_err(|e| format!("Unexpected eth_accounts result: {}", e))?;
        accounts
            .iter()
            .map(|a| {
                a.parse::<Address>()
                    .map_err(|e| format!("Invalid account {}: {}", a, e))
            })
            .collect()
    }

    pub async fn chain_id(&self) -> Result<ChainId, String> {
        let value = self.request("eth_chainId", json!([])).await?;
        let hex = value
            .as_str()
            .ok_or_else(|| format!("Unexpected eth_chainId result: {}", value))?;
        parse_quantity(hex).map_err(|e| format!("Invalid chain id {}: {}", hex, e))
    }

    /// Returns the transaction hash
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, String> {
        let tx = serde_json::to_value(tx).map_err(|e| e.to_string())?;
        let value = self.request("eth_sendTransaction", json!([tx])).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| format!("Unexpected eth_sendTransaction result: {}", value))
    }

    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<bool>, String> {
        let receipt = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        Ok(receipt_succeeded(&receipt))
    }
}
