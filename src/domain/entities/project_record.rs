//! # ProjectRecord
//!
//! REST API と VizPortal API の情報を統合した出力単位

use serde::Serialize;

use super::project::GranteeCapability;
use super::vizportal::VizPortalProject;

/// 統合済みプロジェクト
///
/// VizPortal のレコードに、REST API の権限情報・所有者名・階層情報を付与したもの
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(flatten)]
    pub project: VizPortalProject,
    pub site_name: String,
    pub content_permissions: Option<String>,
    pub permissions: Vec<GranteeCapability>,
    pub owner_name: Option<String>,
    #[serde(rename = "ownerDSID")]
    pub owner_dsid: Option<String>,
    /// トップレベルを 0 とした階層の深さ
    pub project_level: u32,
    /// 所属するトップレベルプロジェクトの LUID
    pub root_project_id: String,
    /// 親プロジェクトの統合済みレコード（ルートまで再帰的にネスト）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_project: Option<Box<ProjectRecord>>,
}

impl ProjectRecord {
    pub fn luid(&self) -> &str {
        &self.project.luid
    }

    pub fn name(&self) -> &str {
        &self.project.name
    }
}
