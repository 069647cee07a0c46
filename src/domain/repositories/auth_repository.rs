//! # Auth Repository Trait
//!
//! サインイン・サインアウトを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::credentials::{PersonalAccessToken, Session};

/// 認証リポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Personal Access Token でサインインする
    ///
    /// # Errors
    ///
    /// 認証に失敗した場合、またはサーバーに接続できない場合にエラーを返す
    async fn sign_in(&self, credentials: &PersonalAccessToken) -> Result<Session>;

    /// セッションを終了する
    async fn sign_out(&self, session: &Session) -> Result<()>;
}
