//! # Write Report Use Case
//!
//! 統合済みプロジェクトの出力ユースケース

use anyhow::Result;
use std::sync::Arc;

use crate::application::dto::export_config::ExportConfig;
use crate::domain::entities::project_record::ProjectRecord;
use crate::domain::repositories::report_repository::ReportRepository;

/// 出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    File(String),
    Stdout,
}

/// レポート出力ユースケース
pub struct WriteReportUseCase<R: ReportRepository> {
    report_repository: Arc<R>,
}

impl<R: ReportRepository> WriteReportUseCase<R> {
    pub fn new(report_repository: Arc<R>) -> Self {
        Self { report_repository }
    }

    /// 設定に従ってファイルまたは標準出力に書き出す
    ///
    /// # Returns
    ///
    /// 実際の出力先
    pub async fn execute(
        &self,
        records: &[ProjectRecord],
        config: &ExportConfig,
    ) -> Result<ReportDestination> {
        if config.print_to_stdout {
            let rendered = self.report_repository.render(records)?;
            println!("{}", rendered);
            return Ok(ReportDestination::Stdout);
        }

        self.report_repository
            .save(&config.output_path, records)
            .await?;

        Ok(ReportDestination::File(config.output_path.clone()))
    }
}
