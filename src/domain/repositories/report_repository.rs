//! # Report Repository Trait
//!
//! 統合済みプロジェクトの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::project_record::ProjectRecord;

/// レポートリポジトリ
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// レコードを保存する
    ///
    /// # Arguments
    ///
    /// * `path` - 出力先のパス
    /// * `records` - 保存するレコード
    ///
    /// # Errors
    ///
    /// シリアライズまたは書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &str, records: &[ProjectRecord]) -> Result<()>;

    /// レコードを文字列にレンダリングする（標準出力用）
    fn render(&self, records: &[ProjectRecord]) -> Result<String>;
}
