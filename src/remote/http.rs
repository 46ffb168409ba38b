// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transport seam between the request coordinator and the actual network.
//!
//! [`Transport`] executes exactly one attempt of one request. Retries,
//! timeouts, and supersession live a level up in
//! [`crate::remote::Coordinator`]; fakes used in tests implement this trait
//! with scripted outcomes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Delete,
}

impl RequestMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// One request to the service: method, path relative to the base URL, and an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: RequestMethod,
    path: String,
    body: Option<Value>,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: RequestMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: RequestMethod::Delete,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Failure of a single attempt.
///
/// `Connect`, `Status`, and `Timeout` are transient and eligible for retry.
/// `Body` means the service answered 2xx with undecodable JSON; retrying
/// would fetch the same broken payload, so the coordinator treats it as
/// terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    Connect { message: String },
    Status { status: u16, message: String },
    Body { message: String },
    Timeout { after: Duration },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect { message } => write!(f, "connection failed: {message}"),
            TransportError::Status { status, message } => {
                write!(f, "server rejected the request (status={status}): {message}")
            }
            TransportError::Body { message } => {
                write!(f, "response body is not valid JSON: {message}")
            }
            TransportError::Timeout { after } => {
                write!(f, "no response within {}ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, spec: &RequestSpec) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, spec: &RequestSpec) -> Result<Value, TransportError> {
        (**self).execute(spec).await
    }
}

/// HTTP transport speaking JSON to a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, spec: &RequestSpec) -> Result<Value, TransportError> {
        let url = self.url_for(spec.path());
        let mut request = match spec.method() {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
            RequestMethod::Delete => self.client.delete(&url),
        };
        if let Some(body) = spec.body() {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| TransportError::Connect {
            message: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            // The service reports failures as `{"error": "..."}`; fall back to
            // a status line when the body is not in that shape.
            let message = match response.json::<Value>().await {
                Ok(body) => body
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("HTTP error status {}", status.as_u16())),
                Err(_) => format!("HTTP error status {}", status.as_u16()),
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|err| TransportError::Body {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpTransport, RequestMethod, RequestSpec};

    #[test]
    fn base_url_loses_trailing_slashes() {
        let transport = HttpTransport::new("https://fn.example.com/api//");
        assert_eq!(transport.base_url(), "https://fn.example.com/api");
        assert_eq!(
            transport.url_for("/analyzeTextToGraph"),
            "https://fn.example.com/api/analyzeTextToGraph"
        );
    }

    #[test]
    fn spec_constructors_set_the_method() {
        let get = RequestSpec::get("listSavedTexts");
        assert_eq!(get.method(), RequestMethod::Get);
        assert!(get.body().is_none());

        let post = RequestSpec::post("saveText", serde_json::json!({"title": "t"}));
        assert_eq!(post.method(), RequestMethod::Post);
        assert_eq!(post.body().and_then(|b| b["title"].as_str()), Some("t"));

        let delete = RequestSpec::delete("deleteText", serde_json::json!({"textId": "x"}));
        assert_eq!(delete.method().as_str(), "DELETE");
    }
}
