//! VizPortal API Client
//!
//! 非公開の VizPortal API 呼び出し（Tableau の公式サポート対象外）
//!
//! REST API のセッショントークンを `workgroup_session_id` クッキーとして流用して認証する。

use log::debug;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, COOKIE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::errors::TableauApiError;
use super::models::{GetProjectsResult, VizPortalEnvelope, VizPortalRequest};
use crate::domain::entities::credentials::Session;

const VIZPORTAL_PATH: &str = "vizportal/api/web/v1";

/// VizPortal client bound to one server
#[derive(Debug, Clone)]
pub struct VizPortalClient {
    http: Client,
    server: String,
}

impl VizPortalClient {
    pub fn new(http: Client, server: String) -> Self {
        Self { http, server }
    }

    fn endpoint_url(&self, method: &str) -> String {
        format!("{}/{}/{}", self.server, VIZPORTAL_PATH, method)
    }

    /// Session cookie expected by VizPortal, with an empty XSRF token
    pub fn session_cookie(session: &Session) -> String {
        format!("workgroup_session_id={}; XSRF-TOKEN=", session.auth_token)
    }

    /// Make a raw VizPortal call; only HTTP 200 counts as success
    pub async fn call<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: &VizPortalRequest,
    ) -> Result<T, TableauApiError> {
        let url = self.endpoint_url(&request.method);
        debug!("POST {}", url);

        let body = serde_json::to_vec(request).map_err(TableauApiError::Encode)?;

        let response = self
            .http
            .post(&url)
            .header(CACHE_CONTROL, "no-cache")
            .header(ACCEPT, "application/json, text/plain, */*")
            .header("x-xsrf-token", "")
            .header(CONTENT_TYPE, "application/json;charset=UTF-8")
            .header(COOKIE, Self::session_cookie(session))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(TableauApiError::VizPortal {
                method: request.method.clone(),
                status,
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| TableauApiError::Decode {
            what: "VizPortal",
            source,
        })
    }

    /// One page of `getProjects`
    pub async fn get_projects_page(
        &self,
        session: &Session,
        start_index: u32,
        max_items: u32,
    ) -> Result<GetProjectsResult, TableauApiError> {
        let request = VizPortalRequest::get_projects(start_index, max_items);
        let envelope: VizPortalEnvelope<GetProjectsResult> = self.call(session, &request).await?;
        Ok(envelope.result)
    }
}
