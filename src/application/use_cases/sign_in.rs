//! # Sign In Use Case
//!
//! サインイン・サインアウトユースケース

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::entities::credentials::{PersonalAccessToken, Session};
use crate::domain::repositories::auth_repository::AuthRepository;

/// サインインユースケース
pub struct SignInUseCase<A: AuthRepository> {
    auth_repository: Arc<A>,
}

impl<A: AuthRepository> SignInUseCase<A> {
    pub fn new(auth_repository: Arc<A>) -> Self {
        Self { auth_repository }
    }

    /// CLI から受け取ったサインイン情報をそのまま使ってサインインする
    ///
    /// # Errors
    ///
    /// 認証に失敗した場合にエラーを返す
    pub async fn execute(&self, credentials: &PersonalAccessToken) -> Result<Session> {
        self.auth_repository
            .sign_in(credentials)
            .await
            .with_context(|| {
                format!(
                    "Failed to sign in with personal access token '{}'",
                    credentials.token_name
                )
            })
    }

    /// セッションを終了する
    pub async fn sign_out(&self, session: &Session) -> Result<()> {
        self.auth_repository
            .sign_out(session)
            .await
            .context("Failed to sign out")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::auth_repository::MockAuthRepository;

    fn session() -> Session {
        Session {
            auth_token: "token".to_string(),
            site_id: "site-luid".to_string(),
            site_content_url: "finance".to_string(),
            user_id: "user-luid".to_string(),
            api_version: "3.19".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_passes_credentials_unchanged() {
        let mut mock = MockAuthRepository::new();
        mock.expect_sign_in()
            .withf(|credentials| {
                credentials.token_name == "my token"
                    && credentials.token_value == "abc==:XYZ"
                    && credentials.site_content_url == "finance"
            })
            .times(1)
            .returning(|_| Ok(session()));

        let use_case = SignInUseCase::new(Arc::new(mock));
        let credentials = PersonalAccessToken::new(
            "my token".to_string(),
            "abc==:XYZ".to_string(),
            "finance".to_string(),
        );

        let result = use_case.execute(&credentials).await.unwrap();

        assert_eq!(result.site_id, "site-luid");
    }

    #[tokio::test]
    async fn test_sign_in_failure_adds_context() {
        let mut mock = MockAuthRepository::new();
        mock.expect_sign_in()
            .returning(|_| Err(anyhow::anyhow!("401 Unauthorized")));

        let use_case = SignInUseCase::new(Arc::new(mock));
        let credentials =
            PersonalAccessToken::new("ci".to_string(), "secret".to_string(), "".to_string());

        let err = use_case.execute(&credentials).await.unwrap_err();
        let chain = format!("{:#}", err);

        assert!(chain.contains("Failed to sign in with personal access token 'ci'"));
        assert!(chain.contains("401 Unauthorized"));
        assert!(!chain.contains("secret"));
    }

    #[tokio::test]
    async fn test_sign_out() {
        let mut mock = MockAuthRepository::new();
        mock.expect_sign_out()
            .withf(|s| s.auth_token == "token")
            .times(1)
            .returning(|_| Ok(()));

        let use_case = SignInUseCase::new(Arc::new(mock));

        assert!(use_case.sign_out(&session()).await.is_ok());
    }
}
