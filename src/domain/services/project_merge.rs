//! # Project Merge Service
//!
//! REST API のプロジェクトと VizPortal のプロジェクトを統合するドメインサービス
//!
//! REST API は所有者名や階層情報を返さず、VizPortal は権限情報を返さないため、
//! 両方を LUID で突き合わせて1つのレコードにする。

use log::warn;
use std::collections::HashMap;
use thiserror::Error;

use super::hierarchy::{HierarchyError, ProjectHierarchy};
use crate::domain::entities::project::RestProject;
use crate::domain::entities::project_record::ProjectRecord;
use crate::domain::entities::vizportal::VizPortalCatalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectMergeError {
    #[error("Project with luid {luid} not found")]
    RestProjectNotFound { luid: String },

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// プロジェクト統合サービス
pub struct ProjectMergeService;

impl ProjectMergeService {
    /// VizPortal の各プロジェクトに REST API の情報と階層情報を付与する
    ///
    /// 出力順は VizPortal の返却順（名前の昇順）に従う。
    ///
    /// # Errors
    ///
    /// VizPortal のプロジェクトに対応する REST プロジェクトがない場合、
    /// または階層をたどれない場合にエラーを返す
    pub fn merge(
        site_name: &str,
        rest_projects: &[RestProject],
        catalog: &VizPortalCatalog,
    ) -> Result<Vec<ProjectRecord>, ProjectMergeError> {
        let rest_by_id: HashMap<&str, &RestProject> =
            rest_projects.iter().map(|p| (p.id.as_str(), p)).collect();
        let hierarchy = ProjectHierarchy::new(&catalog.projects);

        let mut records = Vec::with_capacity(catalog.projects.len());

        for vpc_project in &catalog.projects {
            let rest_project = rest_by_id.get(vpc_project.luid.as_str()).ok_or_else(|| {
                ProjectMergeError::RestProjectNotFound {
                    luid: vpc_project.luid.clone(),
                }
            })?;

            let owner = vpc_project
                .owner_id
                .as_deref()
                .and_then(|owner_id| catalog.user_by_id(owner_id));
            if owner.is_none() {
                warn!(
                    "Owner {:?} of project {} not found in VizPortal users",
                    vpc_project.owner_id, vpc_project.luid
                );
            }

            let (project_level, root_project_id) = hierarchy.level_and_root(vpc_project)?;

            records.push(ProjectRecord {
                project: vpc_project.clone(),
                site_name: site_name.to_string(),
                content_permissions: rest_project.content_permissions.clone(),
                permissions: rest_project.permissions.clone(),
                owner_name: owner.and_then(|u| u.display_name.clone()),
                owner_dsid: owner.and_then(|u| u.username.clone()),
                project_level,
                root_project_id,
                parent_project: None,
            });
        }

        // 全レコードが揃ってから親を付与する（親が後ろに並ぶ場合があるため）
        let positions: HashMap<&str, usize> = catalog
            .projects
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.as_str(), i))
            .collect();

        let mut nested = Vec::with_capacity(records.len());
        for index in 0..records.len() {
            let mut chain = Vec::new();
            nested.push(Self::with_parents(&records, &hierarchy, &positions, index, &mut chain)?);
        }

        Ok(nested)
    }

    /// 親レコードをルートまで再帰的にネストしたコピーを作る
    ///
    /// トップレベルのプロジェクトも `parentProjectId` を持ちうるため、
    /// `chain` にたどった位置を積み、同じプロジェクトに戻ったら循環とみなす
    fn with_parents(
        records: &[ProjectRecord],
        hierarchy: &ProjectHierarchy<'_>,
        positions: &HashMap<&str, usize>,
        index: usize,
        chain: &mut Vec<usize>,
    ) -> Result<ProjectRecord, HierarchyError> {
        if chain.contains(&index) {
            let start = chain.first().copied().unwrap_or(index);
            return Err(HierarchyError::Cycle {
                project_id: records[start].project.id.clone(),
            });
        }
        chain.push(index);

        let mut record = records[index].clone();
        if let Some(parent_index) = hierarchy
            .parent_of(&record.project)
            .and_then(|parent| positions.get(parent.id.as_str()))
        {
            let parent = Self::with_parents(records, hierarchy, positions, *parent_index, chain)?;
            record.parent_project = Some(Box::new(parent));
        }

        chain.pop();
        Ok(record)
    }
}
