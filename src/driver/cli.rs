//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::config::ConfigFile;

/// Tableau Server のプロジェクト情報をエクスポートするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "tableau-projects")]
#[command(
    about = "Export Tableau Server project metadata using the REST and VizPortal APIs",
    long_about = None
)]
pub struct Args {
    /// The Tableau Server URL
    #[arg(short = 's', long)]
    pub server: Option<String>,

    /// The site content URL (empty for the Default site)
    #[arg(short = 'T', long)]
    pub site: Option<String>,

    /// The name of the Personal Access Token
    #[arg(short = 'N', long, alias = "pat-name")]
    pub token_name: Option<String>,

    /// The value of the Personal Access Token
    #[arg(short = 'v', long, alias = "pat-value")]
    pub token_value: Option<String>,

    /// Config file path (JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output file path [default: output/projects.json]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pin the REST API version instead of asking the server
    #[arg(long)]
    pub api_version: Option<String>,

    /// Verify TLS certificates (disabled by default)
    #[arg(long)]
    pub verify_ssl: bool,

    /// Skip TLS verification even if the config file enables it
    #[arg(long, conflicts_with = "verify_ssl")]
    pub no_verify_ssl: bool,

    /// Page size for REST API project listing
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Print the JSON report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl Args {
    /// Values given on the command line, used to override the config file
    pub fn overrides(&self) -> ConfigFile {
        ConfigFile {
            server: self.server.clone(),
            site: self.site.clone(),
            token_name: self.token_name.clone(),
            token_value: self.token_value.clone(),
            api_version: self.api_version.clone(),
            verify_ssl: self.verify_ssl_override(),
            output_path: self.output.clone(),
            page_size: self.page_size,
            vizportal_page_size: None,
            timeout_secs: None,
        }
    }

    fn verify_ssl_override(&self) -> Option<bool> {
        if self.verify_ssl {
            Some(true)
        } else if self.no_verify_ssl {
            Some(false)
        } else {
            None
        }
    }
}
