//! JSON Report Repository Implementation
//!
//! ReportRepositoryのJSON実装（統合済みプロジェクトをJSONファイルに書き出す）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::domain::entities::project_record::ProjectRecord;
use crate::domain::repositories::report_repository::ReportRepository;

/// JSONファイルベースのレポートリポジトリ
pub struct JsonReportRepository;

impl JsonReportRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// 4スペースインデントのJSONにシリアライズする
    fn to_json(records: &[ProjectRecord]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut serializer)
            .context("Failed to serialize project records")?;
        Ok(buf)
    }

    /// ファイルに書き出す（同期処理）
    fn save_sync(path: &str, json: &[u8]) -> Result<()> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(&*expanded);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create output directory")?;
            }
        }

        fs::write(path, json)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl ReportRepository for JsonReportRepository {
    async fn save(&self, path: &str, records: &[ProjectRecord]) -> Result<()> {
        let json = Self::to_json(records)?;
        let path = path.to_string();
        let count = records.len();

        tokio::task::spawn_blocking(move || Self::save_sync(&path, &json))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        info!("Saved {} project records", count);
        Ok(())
    }

    fn render(&self, records: &[ProjectRecord]) -> Result<String> {
        let json = Self::to_json(records)?;
        String::from_utf8(json).context("Report is not valid UTF-8")
    }
}

impl Default for JsonReportRepository {
    fn default() -> Self {
        Self::new()
    }
}
