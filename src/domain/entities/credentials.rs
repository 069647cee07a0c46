//! # Credentials
//!
//! サインインに使う Personal Access Token と、認証済みセッション

use std::fmt;

/// Personal Access Token によるサインイン情報
///
/// CLI で受け取った値をそのまま保持し、認証呼び出しに渡す
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken {
    /// トークン名
    pub token_name: String,
    /// トークンの値（シークレット）
    pub token_value: String,
    /// サイトの contentUrl（Default サイトは空文字）
    pub site_content_url: String,
}

impl PersonalAccessToken {
    /// 新しいサインイン情報を作成
    pub fn new(token_name: String, token_value: String, site_content_url: String) -> Self {
        Self {
            token_name,
            token_value,
            site_content_url,
        }
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonalAccessToken")
            .field("token_name", &self.token_name)
            .field("token_value", &"<redacted>")
            .field("site_content_url", &self.site_content_url)
            .finish()
    }
}

/// 認証済みセッション
///
/// プロセスの生存期間中に1つだけ存在する
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// `X-Tableau-Auth` / `workgroup_session_id` に使う認証トークン
    pub auth_token: String,
    /// サイトID（LUID）
    pub site_id: String,
    /// サイトの contentUrl
    pub site_content_url: String,
    /// サインインしたユーザーのID
    pub user_id: String,
    /// 使用する REST API バージョン
    pub api_version: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth_token", &"<redacted>")
            .field("site_id", &self.site_id)
            .field("site_content_url", &self.site_content_url)
            .field("user_id", &self.user_id)
            .field("api_version", &self.api_version)
            .finish()
    }
}
