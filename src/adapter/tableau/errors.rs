//! Tableau API Errors
//!
//! REST API / VizPortal API 呼び出しのエラー分類

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableauApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Tableau のエラードキュメント（`{"error": {...}}`）を伴う失敗
    #[error("Tableau API error {code} ({status}): {summary}: {detail}")]
    Api {
        status: StatusCode,
        code: String,
        summary: String,
        detail: String,
    },

    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("VizPortal call {method} failed with {status}. Response: {body}")]
    VizPortal {
        method: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorDocument {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl TableauApiError {
    /// 失敗レスポンスからエラーを組み立てる
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorDocument>(body) {
            Ok(doc) => TableauApiError::Api {
                status,
                code: doc.error.code.unwrap_or_default(),
                summary: doc.error.summary.unwrap_or_default(),
                detail: doc.error.detail.unwrap_or_default(),
            },
            Err(_) => TableauApiError::Status {
                status,
                body: body.to_string(),
            },
        }
    }
}
