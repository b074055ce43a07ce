//! Remote AI service client.
//!
//! Every call is one HTTP POST to a single endpoint carrying an `action`
//! discriminator and a JSON `payload`. Responses are opaque JSON the caller
//! renders; failures become [`AttuneError::Remote`] with a human-readable
//! message the UI can show as-is. No retries here: the caller resubmits.

use serde_json::{json, Value};
use std::time::Duration;

use crate::error::{AttuneError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Operations the service multiplexes on one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    GenerateCreation,
    GetChatResponse,
    GetInsight,
}

impl RemoteAction {
    /// Wire name of the action discriminator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateCreation => "generateCreation",
            Self::GetChatResponse => "getChatResponse",
            Self::GetInsight => "getInsight",
        }
    }
}

pub struct RemoteClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// POST `{action, payload}` and return the response JSON.
    pub fn call(&self, action: RemoteAction, payload: Value) -> Result<Value> {
        let body = json!({
            "action": action.as_str(),
            "payload": payload,
        });

        let response = self.http.post(&self.endpoint).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AttuneError::Remote {
                message: error_message(status.as_u16(), &body),
            });
        }
        Ok(response.json()?)
    }

    pub fn generate_creation(&self, payload: Value) -> Result<Value> {
        self.call(RemoteAction::GenerateCreation, payload)
    }

    pub fn chat_response(&self, payload: Value) -> Result<Value> {
        self.call(RemoteAction::GetChatResponse, payload)
    }

    pub fn insight(&self, payload: Value) -> Result<Value> {
        self.call(RemoteAction::GetInsight, payload)
    }
}

/// Message for a non-2xx response: the `error` field of a JSON body when
/// present, otherwise a generic status-code line.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("server error: {status}"))
}
