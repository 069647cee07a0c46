//! REST Project Repository Implementation
//!
//! ProjectRepositoryの REST API 実装（ページングを含む）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::adapter::tableau::RestApiClient;
use crate::domain::entities::credentials::Session;
use crate::domain::entities::project::{GranteeCapability, RestProject};
use crate::domain::repositories::project_repository::ProjectRepository;

/// REST API によるプロジェクトリポジトリ
pub struct RestProjectRepository {
    client: Arc<RestApiClient>,
    page_size: u32,
}

impl RestProjectRepository {
    pub fn new(client: Arc<RestApiClient>, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl ProjectRepository for RestProjectRepository {
    async fn list_projects(&self, session: &Session) -> Result<Vec<RestProject>> {
        let mut projects = Vec::new();
        let mut page_number = 1;

        loop {
            let page = self
                .client
                .query_projects(session, page_number, self.page_size)
                .await
                .with_context(|| format!("Failed to query projects page {}", page_number))?;

            let fetched = page.projects.len();
            projects.extend(page.projects);
            debug!(
                "Projects page {}: {} items ({} / {})",
                page_number,
                fetched,
                projects.len(),
                page.pagination.total_available
            );

            if fetched == 0 || projects.len() >= page.pagination.total_available as usize {
                break;
            }
            page_number += 1;
        }

        Ok(projects)
    }

    async fn project_permissions(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<GranteeCapability>> {
        self.client
            .query_project_permissions(session, project_id)
            .await
            .with_context(|| format!("Failed to query permissions of project {}", project_id))
    }
}
