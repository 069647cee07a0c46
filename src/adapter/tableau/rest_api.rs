//! Tableau REST API Client
//!
//! サインイン、プロジェクト一覧、権限取得を行う REST API クライアント

use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::Client;

use super::client::{expect_success, read_json};
use super::errors::TableauApiError;
use super::models::{
    GranteeCapabilityWire, Pagination, PermissionsResponse, ProjectsResponse, ServerInfo,
    ServerInfoResponse, SignInCredentials, SignInRequest, SignInResponse, SiteContentUrl,
};
use crate::domain::entities::credentials::{PersonalAccessToken, Session};
use crate::domain::entities::project::{GranteeCapability, RestProject};

/// Oldest API version that exposes `serverinfo`
pub const SERVER_INFO_API_VERSION: &str = "2.4";
/// Used when the server version cannot be discovered
pub const DEFAULT_API_VERSION: &str = "3.4";

const AUTH_HEADER: &str = "X-Tableau-Auth";
const JSON: &str = "application/json";

/// One page of `Query Projects`
#[derive(Debug)]
pub struct ProjectsPage {
    pub pagination: Pagination,
    pub projects: Vec<RestProject>,
}

/// REST API client bound to one server
#[derive(Debug, Clone)]
pub struct RestApiClient {
    http: Client,
    server: String,
    api_version: Option<String>,
}

impl RestApiClient {
    /// `api_version` pins the version; `None` means "use the server's version"
    pub fn new(http: Client, server: String, api_version: Option<String>) -> Self {
        Self {
            http,
            server,
            api_version,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn api_url(&self, version: &str, path: &str) -> String {
        format!("{}/api/{}/{}", self.server, version, path)
    }

    fn site_url(&self, session: &Session, path: &str) -> String {
        self.api_url(
            &session.api_version,
            &format!("sites/{}/{}", session.site_id, path),
        )
    }

    /// Query server info (product and REST API version)
    pub async fn server_info(&self) -> Result<ServerInfo, TableauApiError> {
        let url = self.api_url(SERVER_INFO_API_VERSION, "serverinfo");
        debug!("GET {}", url);

        let response = self.http.get(&url).header(ACCEPT, JSON).send().await?;
        let body: ServerInfoResponse = read_json(response, "serverinfo").await?;
        Ok(body.server_info)
    }

    /// Pinned version, else the server's version, else the default
    pub async fn resolve_api_version(&self) -> String {
        if let Some(version) = &self.api_version {
            return version.clone();
        }

        match self.server_info().await {
            Ok(info) => {
                let product = info
                    .product_version
                    .and_then(|v| v.value)
                    .unwrap_or_else(|| "unknown".to_string());
                info!(
                    "Using server REST API version {} (Tableau Server {})",
                    info.rest_api_version, product
                );
                info.rest_api_version
            }
            Err(e) => {
                warn!(
                    "Could not determine server version ({}), using {}",
                    e, DEFAULT_API_VERSION
                );
                DEFAULT_API_VERSION.to_string()
            }
        }
    }

    /// Sign in with a personal access token
    pub async fn sign_in(
        &self,
        credentials: &PersonalAccessToken,
    ) -> Result<Session, TableauApiError> {
        let api_version = self.resolve_api_version().await;
        let url = self.api_url(&api_version, "auth/signin");
        debug!("POST {} (token name: {})", url, credentials.token_name);

        let request = SignInRequest {
            credentials: SignInCredentials {
                personal_access_token_name: &credentials.token_name,
                personal_access_token_secret: &credentials.token_value,
                site: SiteContentUrl {
                    content_url: &credentials.site_content_url,
                },
            },
        };

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, JSON)
            .json(&request)
            .send()
            .await?;
        let body: SignInResponse = read_json(response, "sign-in").await?;

        Ok(Session {
            auth_token: body.credentials.token,
            site_id: body.credentials.site.id,
            site_content_url: body.credentials.site.content_url,
            user_id: body.credentials.user.id,
            api_version,
        })
    }

    /// Invalidate the session token
    pub async fn sign_out(&self, session: &Session) -> Result<(), TableauApiError> {
        let url = self.api_url(&session.api_version, "auth/signout");
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(AUTH_HEADER, &session.auth_token)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Query one page of projects (page numbers start at 1)
    pub async fn query_projects(
        &self,
        session: &Session,
        page_number: u32,
        page_size: u32,
    ) -> Result<ProjectsPage, TableauApiError> {
        let url = self.site_url(session, "projects");
        debug!("GET {} (page {}, size {})", url, page_number, page_size);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, JSON)
            .header(AUTH_HEADER, &session.auth_token)
            .query(&[("pageSize", page_size), ("pageNumber", page_number)])
            .send()
            .await?;
        let body: ProjectsResponse = read_json(response, "projects").await?;

        Ok(ProjectsPage {
            pagination: body.pagination,
            projects: body
                .projects
                .project
                .into_iter()
                .map(RestProject::from)
                .collect(),
        })
    }

    /// Query the explicit permissions of a project
    pub async fn query_project_permissions(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<GranteeCapability>, TableauApiError> {
        let url = self.site_url(session, &format!("projects/{}/permissions", project_id));
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, JSON)
            .header(AUTH_HEADER, &session.auth_token)
            .send()
            .await?;
        let body: PermissionsResponse = read_json(response, "permissions").await?;

        Ok(body
            .permissions
            .grantee_capabilities
            .into_iter()
            .filter_map(GranteeCapabilityWire::into_domain)
            .collect())
    }
}
