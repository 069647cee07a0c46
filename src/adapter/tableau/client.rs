//! HTTP Client Setup
//!
//! reqwest クライアントの構築と共通レスポンス処理

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::errors::TableauApiError;

/// HTTPクライアント設定
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// TLS証明書を検証するかどうか
    pub verify_ssl: bool,
    /// リクエスト全体のタイムアウト
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            verify_ssl: false,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Build the shared HTTP client used by both API families
pub fn build_http_client(settings: &HttpSettings) -> Result<Client, TableauApiError> {
    let client = Client::builder()
        .user_agent(concat!("tableau-projects/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.timeout)
        .danger_accept_invalid_certs(!settings.verify_ssl)
        .build()?;
    Ok(client)
}

/// Normalize a server address the way the Tableau client library does:
/// default to `http://` when no scheme is given and drop trailing slashes
pub fn normalize_server_address(address: &str) -> String {
    let trimmed = address.trim();
    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Read a successful JSON response, or turn a failure into a typed error
pub async fn read_json<T: DeserializeOwned>(
    response: Response,
    what: &'static str,
) -> Result<T, TableauApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(TableauApiError::from_response(status, &body));
    }

    serde_json::from_str(&body).map_err(|source| TableauApiError::Decode { what, source })
}

/// Check that a response without a meaningful body succeeded
pub async fn expect_success(response: Response) -> Result<(), TableauApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await?;
    Err(TableauApiError::from_response(status, &body))
}
