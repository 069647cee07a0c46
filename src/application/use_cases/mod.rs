//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **SignInUseCase**: サインインとサインアウト
//! - **CollectProjectsUseCase**: REST / VizPortal からの取得と統合
//! - **WriteReportUseCase**: 統合結果の出力

pub mod collect_projects;
pub mod sign_in;
pub mod write_report;
