//! # Domain Services
//!
//! エンティティをまたぐビジネスルール
//!
//! - **hierarchy**: プロジェクト階層（レベルとルート）の計算
//! - **project_merge**: REST API と VizPortal API のプロジェクト統合

pub mod hierarchy;
pub mod project_merge;
