//! One HTTP call as a unit of work: classify, summarize, and transcribe it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::ExecutorError,
    guard::{InFlightGuard, InFlightToken},
    transport::{HttpMethod, Transport},
};

#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub method: HttpMethod,
    pub url: String,
    pub label: String,
    pub payload: Option<Value>,
}

impl OperationRequest {
    pub fn get(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            label: label.into(),
            payload: None,
        }
    }

    pub fn post(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url, label)
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Response body as parsed JSON, or the raw text when it is not JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub ok: bool,
    pub http_status: u16,
    pub body: Option<ResponseBody>,
}

impl OperationResult {
    pub fn json(&self) -> Option<&Value> {
        self.body.as_ref().and_then(ResponseBody::as_json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Loading,
    Success,
    Error,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// The most recent or ongoing operation. Each new one overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub kind: StatusKind,
    pub title: String,
    pub message: String,
}

impl OperationStatus {
    pub fn idle() -> Self {
        Self {
            kind: StatusKind::Idle,
            title: "Ready".to_string(),
            message: "Check API connection first.".to_string(),
        }
    }

    pub fn loading(label: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Loading,
            title: label.into(),
            message: "Operation in progress...".to_string(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl Default for OperationStatus {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub result: OperationResult,
    pub transcript: String,
    pub status: OperationStatus,
    pub finished_at: DateTime<Utc>,
}

/// Short operator-facing summary of a successful response.
pub fn summarize(body: Option<&ResponseBody>, label: &str) -> String {
    let Some(value) = body.and_then(ResponseBody::as_json) else {
        return format!("{label}: done");
    };
    match value {
        Value::Array(entries) => {
            let succeeded = entries
                .iter()
                .filter(|entry| matches!(entry.get("success"), Some(Value::Bool(true))))
                .count();
            let failed = entries.len() - succeeded;
            format!("{label}: success {succeeded}, failed {failed}")
        }
        Value::Object(fields) => {
            if matches!(fields.get("success"), Some(Value::Bool(true))) {
                return format!("{label}: success");
            }
            if let Some(message) = fields
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
            {
                return format!("{label}: {message}");
            }
            if let Some(status) = fields.get("status").and_then(Value::as_str) {
                return format!("{label}: {status}");
            }
            format!("{label}: done")
        }
        _ => format!("{label}: done"),
    }
}

pub fn transcript(method: HttpMethod, url: &str, http_status: u16, body: &ResponseBody) -> String {
    [
        format!("{method} {url}"),
        format!("HTTP {http_status}"),
        String::new(),
        body.render(),
    ]
    .join("\n")
}

pub struct OperationExecutor<T> {
    transport: T,
    guard: InFlightGuard,
}

impl<T: Transport> OperationExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_guard(transport, InFlightGuard::new())
    }

    pub fn with_guard(transport: T, guard: InFlightGuard) -> Self {
        Self { transport, guard }
    }

    pub fn guard(&self) -> &InFlightGuard {
        &self.guard
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Claims the single in-flight slot. The caller publishes its loading
    /// state between `begin` and `run`.
    pub fn begin(
        &self,
        request: OperationRequest,
    ) -> Result<PendingOperation<'_, T>, ExecutorError> {
        let token = self.guard.try_acquire(&request.label)?;
        Ok(PendingOperation {
            transport: &self.transport,
            request,
            _token: token,
        })
    }

    pub async fn execute(
        &self,
        request: OperationRequest,
    ) -> Result<OperationOutcome, ExecutorError> {
        Ok(self.begin(request)?.run().await)
    }
}

pub struct PendingOperation<'a, T> {
    transport: &'a T,
    request: OperationRequest,
    _token: InFlightToken,
}

impl<T: Transport> PendingOperation<'_, T> {
    pub fn request(&self) -> &OperationRequest {
        &self.request
    }

    pub fn label(&self) -> &str {
        &self.request.label
    }

    pub async fn run(self) -> OperationOutcome {
        let OperationRequest {
            method,
            url,
            label,
            payload,
        } = &self.request;
        info!(%method, %url, %label, "operation started");

        match self.transport.send(*method, url, payload.as_ref()).await {
            Ok(raw) => {
                let ok = (200..300).contains(&raw.status);
                let body = ResponseBody::parse(raw.text);
                let transcript = transcript(*method, url, raw.status, &body);
                let status = if ok {
                    info!(%method, %url, http_status = raw.status, "operation finished");
                    OperationStatus::success(label.clone(), summarize(Some(&body), label))
                } else {
                    warn!(%method, %url, http_status = raw.status, "operation rejected by backend");
                    OperationStatus::error(
                        label.clone(),
                        format!(
                            "HTTP {}. Inspect the diagnostic transcript for details.",
                            raw.status
                        ),
                    )
                };
                OperationOutcome {
                    result: OperationResult {
                        ok,
                        http_status: raw.status,
                        body: Some(body),
                    },
                    transcript,
                    status,
                    finished_at: Utc::now(),
                }
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%method, %url, error = %message, "transport failure");
                OperationOutcome {
                    result: OperationResult {
                        ok: false,
                        http_status: 0,
                        body: None,
                    },
                    transcript: message.clone(),
                    status: OperationStatus::error(label.clone(), message),
                    finished_at: Utc::now(),
                }
            }
        }
    }
}
