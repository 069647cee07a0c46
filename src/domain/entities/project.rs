//! # REST Project Entity
//!
//! REST API から取得したプロジェクトと、その権限

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 権限の付与対象
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grantee {
    User { id: String },
    Group { id: String },
}

/// 個々の権限（例: `Read` / `Allow`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub name: String,
    pub mode: String,
}

/// 付与対象ごとの権限セット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GranteeCapability {
    #[serde(flatten)]
    pub grantee: Grantee,
    pub capabilities: Vec<Capability>,
}

/// REST API のプロジェクト
#[derive(Debug, Clone, PartialEq)]
pub struct RestProject {
    /// プロジェクトID（LUID）
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_project_id: Option<String>,
    /// 例: `ManagedByOwner`, `LockedToProject`
    pub content_permissions: Option<String>,
    pub owner_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// `populate_permissions` で埋められる権限一覧
    pub permissions: Vec<GranteeCapability>,
}

impl RestProject {
    /// ID と名前だけを持つプロジェクトを作成
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            parent_project_id: None,
            content_permissions: None,
            owner_id: None,
            created_at: None,
            updated_at: None,
            permissions: Vec::new(),
        }
    }
}
