//! # VizPortal Repository Trait
//!
//! VizPortal API からのプロジェクト取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::credentials::Session;
use crate::domain::entities::vizportal::VizPortalCatalog;

/// VizPortal リポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VizPortalRepository: Send + Sync {
    /// 全プロジェクトと所有者ユーザーを名前の昇順で取得する
    ///
    /// REST API のセッショントークンで認証する
    async fn get_projects(&self, session: &Session) -> Result<VizPortalCatalog>;
}
