//! # Collect Projects Use Case
//!
//! REST API と VizPortal API からプロジェクトを取得し、統合するユースケース

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::application::dto::export_config::ExportConfig;
use crate::domain::entities::credentials::Session;
use crate::domain::entities::project::RestProject;
use crate::domain::entities::project_record::ProjectRecord;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::vizportal_repository::VizPortalRepository;
use crate::domain::services::project_merge::ProjectMergeService;

/// プロジェクト収集ユースケース
pub struct CollectProjectsUseCase<P: ProjectRepository, V: VizPortalRepository> {
    project_repository: Arc<P>,
    vizportal_repository: Arc<V>,
}

impl<P: ProjectRepository, V: VizPortalRepository> CollectProjectsUseCase<P, V> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `project_repository` - REST API のプロジェクトリポジトリ
    /// * `vizportal_repository` - VizPortal リポジトリ
    pub fn new(project_repository: Arc<P>, vizportal_repository: Arc<V>) -> Self {
        Self {
            project_repository,
            vizportal_repository,
        }
    }

    /// REST API の全プロジェクトを取得し、権限を付与する
    pub async fn fetch_rest_projects(&self, session: &Session) -> Result<Vec<RestProject>> {
        let mut projects = self
            .project_repository
            .list_projects(session)
            .await
            .context("Failed to list projects from the REST API")?;

        for project in &mut projects {
            debug!("Populating permissions for project {}", project.id);
            project.permissions = self
                .project_repository
                .project_permissions(session, &project.id)
                .await
                .with_context(|| format!("Failed to populate permissions for {}", project.id))?;
        }

        Ok(projects)
    }

    /// プロジェクトを取得して統合する
    ///
    /// # Errors
    ///
    /// いずれかの API 呼び出し、または統合に失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        session: &Session,
        config: &ExportConfig,
    ) -> Result<Vec<ProjectRecord>> {
        let rest_projects = self.fetch_rest_projects(session).await?;
        info!("Fetched {} projects from the REST API", rest_projects.len());

        let catalog = self
            .vizportal_repository
            .get_projects(session)
            .await
            .context("Failed to get projects from the VizPortal API")?;
        info!(
            "Fetched {} projects and {} users from the VizPortal API",
            catalog.projects.len(),
            catalog.users.len()
        );

        let records = ProjectMergeService::merge(&config.site_name, &rest_projects, &catalog)?;

        Ok(records)
    }
}
