//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **PersonalAccessToken / Session**: サインイン情報と認証済みセッション
//! - **RestProject**: REST API のプロジェクトと権限
//! - **VizPortalProject / VizPortalUser**: VizPortal API のプロジェクトとユーザー
//! - **ProjectRecord**: 統合済みの出力レコード

pub mod credentials;
pub mod project;
pub mod project_record;
pub mod vizportal;
