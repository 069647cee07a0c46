//! # Project Repository Trait
//!
//! REST API からのプロジェクト取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::credentials::Session;
use crate::domain::entities::project::{GranteeCapability, RestProject};

/// プロジェクトリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// サイト内の全プロジェクトを取得する（全ページ）
    ///
    /// # Arguments
    ///
    /// * `session` - 認証済みセッション
    ///
    /// # Returns
    ///
    /// 権限が未取得（空）のプロジェクト一覧
    async fn list_projects(&self, session: &Session) -> Result<Vec<RestProject>>;

    /// プロジェクトの権限を取得する
    ///
    /// # Arguments
    ///
    /// * `session` - 認証済みセッション
    /// * `project_id` - プロジェクトの LUID
    async fn project_permissions(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<GranteeCapability>>;
}
