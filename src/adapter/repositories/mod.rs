//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod json_report_repository;
pub mod rest_auth_repository;
pub mod rest_project_repository;
pub mod vizportal_project_repository;
