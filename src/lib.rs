//! # tableau-projects
//!
//! Tableau Server のプロジェクト情報を REST API と VizPortal API から取得し、統合して出力するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: エンティティ、Repository trait、階層計算と統合のルール（外部依存なし）
//! - **Application層**: サインイン・収集・出力のユースケース
//! - **Adapter層**: 外部システムとの統合（Tableau REST API, VizPortal API, ファイルシステム）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
