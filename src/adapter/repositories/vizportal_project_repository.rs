//! VizPortal Project Repository Implementation
//!
//! VizPortalRepositoryの実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use crate::adapter::tableau::VizPortalClient;
use crate::domain::entities::credentials::Session;
use crate::domain::entities::vizportal::VizPortalCatalog;
use crate::domain::repositories::vizportal_repository::VizPortalRepository;

/// VizPortal API によるプロジェクトリポジトリ
pub struct VizPortalProjectRepository {
    client: Arc<VizPortalClient>,
    page_size: u32,
}

impl VizPortalProjectRepository {
    pub fn new(client: Arc<VizPortalClient>, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl VizPortalRepository for VizPortalProjectRepository {
    async fn get_projects(&self, session: &Session) -> Result<VizPortalCatalog> {
        let mut catalog = VizPortalCatalog::default();
        let mut seen_users = HashSet::new();
        let mut start_index: u32 = 0;

        loop {
            let page = self
                .client
                .get_projects_page(session, start_index, self.page_size)
                .await
                .with_context(|| format!("getProjects failed at index {}", start_index))?;

            let fetched = page.projects.len();
            catalog.projects.extend(page.projects);
            for user in page.users {
                if seen_users.insert(user.id.clone()) {
                    catalog.users.push(user);
                }
            }
            debug!(
                "getProjects from {}: {} projects (total {:?})",
                start_index, fetched, page.total_count
            );

            // totalCount がなければ1ページのみ
            match page.total_count {
                Some(total) if fetched > 0 && (catalog.projects.len() as u64) < total => {
                    start_index += fetched as u32;
                }
                _ => break,
            }
        }

        Ok(catalog)
    }
}
