//! Workflow Orchestration
//!
//! サインイン → 取得・統合 → 出力 → サインアウト のオーケストレーション

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::json_report_repository::JsonReportRepository;
use crate::adapter::repositories::rest_auth_repository::RestAuthRepository;
use crate::adapter::repositories::rest_project_repository::RestProjectRepository;
use crate::adapter::repositories::vizportal_project_repository::VizPortalProjectRepository;
use crate::adapter::tableau::{build_http_client, RestApiClient, VizPortalClient};
use crate::application::dto::export_config::ExportConfig;
use crate::application::use_cases::collect_projects::CollectProjectsUseCase;
use crate::application::use_cases::sign_in::SignInUseCase;
use crate::application::use_cases::write_report::{ReportDestination, WriteReportUseCase};
use crate::domain::entities::credentials::{PersonalAccessToken, Session};
use crate::domain::entities::project_record::ProjectRecord;

use super::cli::Args;

/// One summary line per project, indented by hierarchy level
pub fn format_project_line(record: &ProjectRecord) -> String {
    let indent = "  ".repeat(record.project_level as usize);
    format!(
        "    {}- {} | Level: {} | Owner: {} | Permissions: {}",
        indent,
        record.name(),
        record.project_level,
        record.owner_name.as_deref().unwrap_or("(unknown)"),
        record.content_permissions.as_deref().unwrap_or("-"),
    )
}

/// Project Export Workflow
pub struct ProjectExportWorkflow {
    config: Config,
    sign_in_use_case: SignInUseCase<RestAuthRepository>,
    collect_use_case: CollectProjectsUseCase<RestProjectRepository, VizPortalProjectRepository>,
    write_use_case: WriteReportUseCase<JsonReportRepository>,
}

impl ProjectExportWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Result<Self> {
        let http = build_http_client(&config.http_settings())
            .context("Failed to create HTTP client")?;

        // API clients share one connection pool
        let rest_client = Arc::new(RestApiClient::new(
            http.clone(),
            config.server.clone(),
            config.api_version.clone(),
        ));
        let vizportal_client = Arc::new(VizPortalClient::new(http, config.server.clone()));

        // Repository implementations
        let auth_repo = Arc::new(RestAuthRepository::new(rest_client.clone()));
        let project_repo = Arc::new(RestProjectRepository::new(rest_client, config.page_size));
        let vizportal_repo = Arc::new(VizPortalProjectRepository::new(
            vizportal_client,
            config.vizportal_page_size,
        ));
        let report_repo = Arc::new(JsonReportRepository::new());

        Ok(Self {
            config,
            sign_in_use_case: SignInUseCase::new(auth_repo),
            collect_use_case: CollectProjectsUseCase::new(project_repo, vizportal_repo),
            write_use_case: WriteReportUseCase::new(report_repo),
        })
    }

    /// Progress goes to stderr when the report itself is printed to stdout
    fn progress(&self, args: &Args, line: &str) {
        if args.stdout {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    /// Execute the export workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting project export...");

        self.progress(&args, "✓ Using configuration:");
        self.progress(&args, &format!("  Server: {}", self.config.server));
        self.progress(
            &args,
            &format!(
                "  Site: {}",
                if self.config.site.is_empty() {
                    "(default)"
                } else {
                    self.config.site.as_str()
                }
            ),
        );
        self.progress(&args, &format!("  Token: {}", self.config.token_name));

        let credentials = PersonalAccessToken::new(
            self.config.token_name.clone(),
            self.config.token_value.clone(),
            self.config.site.clone(),
        );
        let session = self.sign_in_use_case.execute(&credentials).await?;
        self.progress(
            &args,
            &format!("✓ Signed in (REST API {})", session.api_version),
        );

        let export_config = ExportConfig::new(
            self.config.site.clone(),
            self.config.output_path.clone(),
            args.stdout,
        );
        let result = self.export(&args, &session, &export_config).await;

        // サインアウトは結果に関わらず行う
        match self.sign_in_use_case.sign_out(&session).await {
            Ok(()) => info!("Signed out"),
            Err(e) => warn!("{:#}", e),
        }

        result
    }

    async fn export(&self, args: &Args, session: &Session, config: &ExportConfig) -> Result<()> {
        let records = self.collect_use_case.execute(session, config).await?;
        self.progress(args, &format!("✓ Merged {} projects", records.len()));

        let destination = self.write_use_case.execute(&records, config).await?;

        if let ReportDestination::File(path) = destination {
            for record in &records {
                self.progress(args, &format_project_line(record));
            }
            self.progress(args, &format!("✓ Wrote {}", path));
        }

        self.progress(args, "✓ Export complete!");
        Ok(())
    }
}
