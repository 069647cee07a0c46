//! REST Auth Repository Implementation
//!
//! AuthRepositoryの REST API 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::adapter::tableau::RestApiClient;
use crate::domain::entities::credentials::{PersonalAccessToken, Session};
use crate::domain::repositories::auth_repository::AuthRepository;

/// REST API による認証リポジトリ
pub struct RestAuthRepository {
    client: Arc<RestApiClient>,
}

impl RestAuthRepository {
    pub fn new(client: Arc<RestApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for RestAuthRepository {
    async fn sign_in(&self, credentials: &PersonalAccessToken) -> Result<Session> {
        self.client
            .sign_in(credentials)
            .await
            .with_context(|| format!("Sign-in to {} failed", self.client.server()))
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.client
            .sign_out(session)
            .await
            .context("Sign-out failed")
    }
}
