//! tableau-projects - Tableau Project Exporter
//!
//! Personal Access Token でサインインし、REST API と VizPortal API のプロジェクト情報を統合して出力

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use tableau_projects::adapter::config::Config;
use tableau_projects::driver::{Args, ProjectExportWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (config file, overridden by CLI flags)
    let config = Config::load(args.config.as_deref(), args.overrides())?;

    // Create workflow with injected dependencies
    let workflow = ProjectExportWorkflow::new(config)?;

    workflow.execute(args).await
}
