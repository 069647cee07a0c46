//! # Project Hierarchy Service
//!
//! VizPortal の親子関係から、プロジェクトの階層レベルとルートプロジェクトを求める

use std::collections::HashMap;
use thiserror::Error;

use crate::domain::entities::vizportal::VizPortalProject;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("project {project_id} is not top-level but has no parent project id")]
    MissingParentId { project_id: String },

    #[error("parent project {parent_id} of project {project_id} not found")]
    ParentNotFound {
        project_id: String,
        parent_id: String,
    },

    #[error("project hierarchy starting at {project_id} contains a cycle")]
    Cycle { project_id: String },
}

/// VizPortal 内部IDで索引したプロジェクト階層
pub struct ProjectHierarchy<'a> {
    by_id: HashMap<&'a str, &'a VizPortalProject>,
}

impl<'a> ProjectHierarchy<'a> {
    pub fn new(projects: &'a [VizPortalProject]) -> Self {
        let by_id = projects.iter().map(|p| (p.id.as_str(), p)).collect();
        Self { by_id }
    }

    /// 内部IDでプロジェクトを検索
    pub fn get(&self, id: &str) -> Option<&'a VizPortalProject> {
        self.by_id.get(id).copied()
    }

    /// 親プロジェクトを検索（親IDを持たない場合は `None`）
    pub fn parent_of(&self, project: &VizPortalProject) -> Option<&'a VizPortalProject> {
        project
            .parent_project_id
            .as_deref()
            .and_then(|parent_id| self.get(parent_id))
    }

    /// 階層レベルとルートプロジェクトの LUID を求める
    ///
    /// トップレベルプロジェクトは `(0, 自身の LUID)`。
    /// それ以外は親をたどり、トップレベルの親に到達するまでの段数と、その親の LUID を返す。
    ///
    /// # Errors
    ///
    /// 親が見つからない場合、または循環している場合にエラーを返す
    pub fn level_and_root(
        &self,
        project: &VizPortalProject,
    ) -> Result<(u32, String), HierarchyError> {
        if project.top_level_project {
            return Ok((0, project.luid.clone()));
        }

        let mut current = project;
        let mut level: u32 = 1;

        loop {
            let parent_id = current.parent_project_id.as_deref().ok_or_else(|| {
                HierarchyError::MissingParentId {
                    project_id: current.id.clone(),
                }
            })?;

            let parent = self
                .get(parent_id)
                .ok_or_else(|| HierarchyError::ParentNotFound {
                    project_id: current.id.clone(),
                    parent_id: parent_id.to_string(),
                })?;

            if parent.top_level_project {
                return Ok((level, parent.luid.clone()));
            }

            if level as usize >= self.by_id.len() {
                return Err(HierarchyError::Cycle {
                    project_id: project.id.clone(),
                });
            }

            current = parent;
            level += 1;
        }
    }
}
