//! Tableau Wire Models
//!
//! REST API（JSON形式）と VizPortal API のリクエスト・レスポンス型

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::entities::project::{Capability, Grantee, GranteeCapability, RestProject};
use crate::domain::entities::vizportal::{VizPortalProject, VizPortalUser};

/// The REST API encodes pagination counters as strings
fn deserialize_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().map_err(de::Error::custom),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid counter {}", n))),
        other => Err(de::Error::custom(format!("invalid counter {}", other))),
    }
}

// ---------------------------------------------------------------------------
// serverinfo
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfoResponse {
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(default)]
    pub product_version: Option<ProductVersion>,
    pub rest_api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductVersion {
    #[serde(default)]
    pub value: Option<String>,
}

// ---------------------------------------------------------------------------
// auth/signin
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub credentials: SignInCredentials<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInCredentials<'a> {
    pub personal_access_token_name: &'a str,
    pub personal_access_token_secret: &'a str,
    pub site: SiteContentUrl<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContentUrl<'a> {
    pub content_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub credentials: SignedInCredentials,
}

#[derive(Debug, Deserialize)]
pub struct SignedInCredentials {
    pub token: String,
    pub site: SiteRef,
    pub user: IdRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRef {
    pub id: String,
    #[serde(default)]
    pub content_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    pub id: String,
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(deserialize_with = "deserialize_u32")]
    pub page_number: u32,
    #[serde(deserialize_with = "deserialize_u32")]
    pub page_size: u32,
    #[serde(deserialize_with = "deserialize_u32")]
    pub total_available: u32,
}

#[derive(Debug, Deserialize)]
pub struct ProjectsResponse {
    pub pagination: Pagination,
    #[serde(default)]
    pub projects: ProjectList,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub project: Vec<ProjectWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_project_id: Option<String>,
    #[serde(default)]
    pub content_permissions: Option<String>,
    #[serde(default)]
    pub owner: Option<IdRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProjectWire> for RestProject {
    fn from(wire: ProjectWire) -> Self {
        RestProject {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            parent_project_id: wire.parent_project_id,
            content_permissions: wire.content_permissions,
            owner_id: wire.owner.map(|o| o.id),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            permissions: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// permissions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PermissionsResponse {
    pub permissions: PermissionsWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsWire {
    #[serde(default)]
    pub grantee_capabilities: Vec<GranteeCapabilityWire>,
}

#[derive(Debug, Deserialize)]
pub struct GranteeCapabilityWire {
    #[serde(default)]
    pub user: Option<IdRef>,
    #[serde(default)]
    pub group: Option<IdRef>,
    #[serde(default)]
    pub capabilities: CapabilityList,
}

#[derive(Debug, Default, Deserialize)]
pub struct CapabilityList {
    #[serde(default)]
    pub capability: Vec<CapabilityWire>,
}

#[derive(Debug, Deserialize)]
pub struct CapabilityWire {
    pub name: String,
    pub mode: String,
}

impl GranteeCapabilityWire {
    /// Convert to the domain type; rules without a user or group are dropped
    pub fn into_domain(self) -> Option<GranteeCapability> {
        let grantee = match (self.user, self.group) {
            (Some(user), _) => Grantee::User { id: user.id },
            (None, Some(group)) => Grantee::Group { id: group.id },
            (None, None) => {
                warn!("Skipping permission rule without a grantee");
                return None;
            }
        };

        Some(GranteeCapability {
            grantee,
            capabilities: self
                .capabilities
                .capability
                .into_iter()
                .map(|c| Capability {
                    name: c.name,
                    mode: c.mode,
                })
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// VizPortal
// ---------------------------------------------------------------------------

/// VizPortal の呼び出しペイロード（`method` がエンドポイント名を兼ねる）
#[derive(Debug, Clone, Serialize)]
pub struct VizPortalRequest {
    pub method: String,
    pub params: Value,
}

impl VizPortalRequest {
    /// `getProjects`: 名前の昇順で `max_items` 件ずつ取得
    pub fn get_projects(start_index: u32, max_items: u32) -> Self {
        Self {
            method: "getProjects".to_string(),
            params: json!({
                "order": [{"field": "name", "ascending": true}],
                "page": {"startIndex": start_index, "maxItems": max_items},
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VizPortalEnvelope<T> {
    pub result: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectsResult {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub projects: Vec<VizPortalProject>,
    #[serde(default)]
    pub users: Vec<VizPortalUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_shape() {
        let request = SignInRequest {
            credentials: SignInCredentials {
                personal_access_token_name: "ci",
                personal_access_token_secret: "secret",
                site: SiteContentUrl {
                    content_url: "finance",
                },
            },
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "credentials": {
                    "personalAccessTokenName": "ci",
                    "personalAccessTokenSecret": "secret",
                    "site": {"contentUrl": "finance"}
                }
            })
        );
    }

    #[test]
    fn test_projects_response_with_string_pagination() {
        let body = r#"{
            "pagination": {"pageNumber": "2", "pageSize": "100", "totalAvailable": "150"},
            "projects": {"project": [{
                "owner": {"id": "owner-luid"},
                "id": "project-luid",
                "name": "Finance",
                "description": "",
                "createdAt": "2021-03-04T05:06:07Z",
                "updatedAt": "2022-03-04T05:06:07Z",
                "contentPermissions": "LockedToProject",
                "parentProjectId": "parent-luid"
            }]}
        }"#;

        let response: ProjectsResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.pagination.page_number, 2);
        assert_eq!(response.pagination.total_available, 150);

        let project: RestProject = response.projects.project.into_iter().next().unwrap().into();
        assert_eq!(project.id, "project-luid");
        assert_eq!(project.owner_id.as_deref(), Some("owner-luid"));
        assert_eq!(project.content_permissions.as_deref(), Some("LockedToProject"));
        assert_eq!(project.parent_project_id.as_deref(), Some("parent-luid"));
        assert!(project.created_at.is_some());
    }

    #[test]
    fn test_empty_projects_page() {
        let body = r#"{"pagination": {"pageNumber": "1", "pageSize": "100", "totalAvailable": "0"}, "projects": {}}"#;

        let response: ProjectsResponse = serde_json::from_str(body).unwrap();

        assert!(response.projects.project.is_empty());
    }

    #[test]
    fn test_permissions_into_domain() {
        let body = r#"{"permissions": {
            "project": {"id": "p1", "name": "Finance"},
            "granteeCapabilities": [
                {"group": {"id": "g1"}, "capabilities": {"capability": [
                    {"name": "Read", "mode": "Allow"},
                    {"name": "Write", "mode": "Deny"}
                ]}},
                {"user": {"id": "u1"}, "capabilities": {"capability": []}},
                {"capabilities": {"capability": [{"name": "Read", "mode": "Allow"}]}}
            ]
        }}"#;

        let response: PermissionsResponse = serde_json::from_str(body).unwrap();
        let rules: Vec<GranteeCapability> = response
            .permissions
            .grantee_capabilities
            .into_iter()
            .filter_map(GranteeCapabilityWire::into_domain)
            .collect();

        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules[0].grantee,
            Grantee::Group {
                id: "g1".to_string()
            }
        );
        assert_eq!(rules[0].capabilities.len(), 2);
        assert_eq!(rules[0].capabilities[1].mode, "Deny");
        assert_eq!(
            rules[1].grantee,
            Grantee::User {
                id: "u1".to_string()
            }
        );
    }

    #[test]
    fn test_vizportal_get_projects_payload() {
        let request = VizPortalRequest::get_projects(0, 600);

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "method": "getProjects",
                "params": {
                    "order": [{"field": "name", "ascending": true}],
                    "page": {"startIndex": 0, "maxItems": 600}
                }
            })
        );
    }

    #[test]
    fn test_server_info_response() {
        let body = r#"{"serverInfo": {"productVersion": {"value": "2023.3.0", "build": "20233.23.1017.0948"}, "restApiVersion": "3.21"}}"#;

        let response: ServerInfoResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.server_info.rest_api_version, "3.21");
        assert_eq!(
            response
                .server_info
                .product_version
                .and_then(|v| v.value)
                .as_deref(),
            Some("2023.3.0")
        );
    }
}
