//! Workflow Integration Tests
//!
//! ProjectExportWorkflow の統合テスト（Tableau Server を httpmock で代替）

use clap::Parser;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use tableau_projects::adapter::config::{Config, ConfigFile};
use tableau_projects::driver::cli::Args;
use tableau_projects::driver::workflow::ProjectExportWorkflow;

fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// テスト用のConfigを作成
fn create_test_config(server: &MockServer, output_path: &str) -> Config {
    Config::from_file(ConfigFile {
        server: Some(server.base_url()),
        site: Some("finance".to_string()),
        token_name: Some("ci-token".to_string()),
        token_value: Some("ci-secret".to_string()),
        output_path: Some(output_path.to_string()),
        ..Default::default()
    })
    .unwrap()
}

async fn mock_sign_in(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.4/serverinfo");
            then.status(200).json_body(json!({
                "serverInfo": {"productVersion": {"value": "2023.1.0"}, "restApiVersion": "3.19"}
            }));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/3.19/auth/signin")
                .json_body(json!({
                    "credentials": {
                        "personalAccessTokenName": "ci-token",
                        "personalAccessTokenSecret": "ci-secret",
                        "site": {"contentUrl": "finance"}
                    }
                }));
            then.status(200).json_body(json!({
                "credentials": {
                    "site": {"id": "site-luid", "contentUrl": "finance"},
                    "user": {"id": "user-luid"},
                    "token": "session-token"
                }
            }));
        })
        .await
}

async fn mock_sign_out(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/3.19/auth/signout")
                .header("x-tableau-auth", "session-token");
            then.status(204);
        })
        .await
}

async fn mock_rest_projects(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/3.19/sites/site-luid/projects")
                .header("x-tableau-auth", "session-token");
            then.status(200).json_body(fixture("rest_projects.json"));
        })
        .await;

    for project_id in [
        "7a1f0c4e-0001-4b6e-9d1e-000000000001",
        "7a1f0c4e-0002-4b6e-9d1e-000000000002",
        "7a1f0c4e-0003-4b6e-9d1e-000000000003",
        "7a1f0c4e-0004-4b6e-9d1e-000000000004",
    ] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!(
                    "/api/3.19/sites/site-luid/projects/{}/permissions",
                    project_id
                ));
                then.status(200).json_body(json!({
                    "permissions": {
                        "granteeCapabilities": [
                            {"group": {"id": "all-users"}, "capabilities": {"capability": [
                                {"name": "Read", "mode": "Allow"}
                            ]}}
                        ]
                    }
                }));
            })
            .await;
    }
}

#[tokio::test]
async fn test_workflow_exports_merged_projects() {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output").join("projects.json");

    let sign_in = mock_sign_in(&server).await;
    let sign_out = mock_sign_out(&server).await;
    mock_rest_projects(&server).await;
    let vizportal = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/vizportal/api/web/v1/getProjects")
                .header("cookie", "workgroup_session_id=session-token; XSRF-TOKEN=");
            then.status(200).json_body(fixture("vizportal_get_projects.json"));
        })
        .await;

    let config = create_test_config(&server, output_path.to_str().unwrap());
    let workflow = ProjectExportWorkflow::new(config).unwrap();
    let args = Args::parse_from(["tableau-projects"]);

    let result = workflow.execute(args).await;

    assert!(result.is_ok(), "Workflow should succeed, but got: {:?}", result);
    sign_in.assert_async().await;
    vizportal.assert_async().await;
    sign_out.assert_async().await;

    let written: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let projects = written.as_array().unwrap();
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[0]["siteName"], "finance");
    assert_eq!(projects[0]["permissions"][0]["group"]["id"], "all-users");
    assert_eq!(projects[3]["projectLevel"], 2);
    assert_eq!(projects[3]["parentProject"]["parentProject"]["name"], "Finance");
}

#[tokio::test]
async fn test_workflow_signs_out_after_vizportal_failure() {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("projects.json");

    mock_sign_in(&server).await;
    let sign_out = mock_sign_out(&server).await;
    mock_rest_projects(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/vizportal/api/web/v1/getProjects");
            then.status(403).body("Forbidden");
        })
        .await;

    let config = create_test_config(&server, output_path.to_str().unwrap());
    let workflow = ProjectExportWorkflow::new(config).unwrap();
    let args = Args::parse_from(["tableau-projects"]);

    let result = workflow.execute(args).await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Forbidden"));
    sign_out.assert_async().await;
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_workflow_sign_in_failure() {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("projects.json");

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/2.4/serverinfo");
            then.status(200).json_body(json!({
                "serverInfo": {"restApiVersion": "3.19"}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/3.19/auth/signin");
            then.status(401).json_body(json!({
                "error": {"summary": "Signin Error", "detail": "Error signing in to Tableau Server", "code": "401001"}
            }));
        })
        .await;
    let sign_out = mock_sign_out(&server).await;

    let config = create_test_config(&server, output_path.to_str().unwrap());
    let workflow = ProjectExportWorkflow::new(config).unwrap();
    let args = Args::parse_from(["tableau-projects"]);

    let result = workflow.execute(args).await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("401001"));
    assert!(!message.contains("ci-secret"));
    assert_eq!(sign_out.hits_async().await, 0);
}
