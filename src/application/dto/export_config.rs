//! # Export Configuration DTO
//!
//! エクスポート設定のData Transfer Object

/// エクスポート設定
///
/// プロジェクト情報の統合と出力に必要な設定情報。
/// ページサイズは `Config` からリポジトリの生成時に渡すため、ここには持たない。
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// `siteName` として各レコードに付与するサイト名（CLI の `--site` の値）
    pub site_name: String,
    /// 出力ファイルのパス
    pub output_path: String,
    /// ファイルではなく標準出力に書き出すかどうか
    pub print_to_stdout: bool,
}

impl ExportConfig {
    /// 新しいエクスポート設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use tableau_projects::application::dto::export_config::ExportConfig;
    ///
    /// let config = ExportConfig::new(
    ///     "marketing".to_string(),
    ///     "output/projects.json".to_string(),
    ///     false,
    /// );
    ///
    /// assert_eq!(config.site_name, "marketing");
    /// assert!(!config.print_to_stdout);
    /// ```
    pub fn new(site_name: String, output_path: String, print_to_stdout: bool) -> Self {
        Self {
            site_name,
            output_path,
            print_to_stdout,
        }
    }
}
