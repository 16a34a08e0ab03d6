use chrono::{Duration, Utc};
use proposal_agent::config::{ConverterConfig, GoogleSettings, RendererConfig};
use proposal_agent::convert::{DocumentConverter, PandocConverter};
use proposal_agent::google::{document_url, AuthorizedUser, DocumentPublisher, GoogleDrivePublisher};
use proposal_agent::process::run_command;
use proposal_agent::render::{DiagramRenderer, MermaidCli};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_document_url() {
    assert_eq!(
        document_url("abc123"),
        "https://docs.google.com/document/d/abc123/edit"
    );
}

#[test]
fn test_publisher_requires_template_id() {
    let settings = GoogleSettings {
        template_id: None,
        credentials_path: PathBuf::from("token.json"),
        access_token: None,
    };
    let publisher = GoogleDrivePublisher::new(&settings, false);

    let err = publisher.check_ready().unwrap_err();
    assert!(err
        .to_string()
        .contains("GOOGLE_DOC_TEMPLATE_ID environment variable not set."));

    let settings = GoogleSettings {
        template_id: Some("template".to_string()),
        ..settings
    };
    assert!(GoogleDrivePublisher::new(&settings, false).check_ready().is_ok());
}

#[test]
fn test_authorized_user_expiry() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("token.json");
    let expiry = Utc::now() + Duration::minutes(30);
    fs::write(
        &path,
        format!(
            r#"{{"token": "ya29.x", "refresh_token": "1//r", "client_id": "id", "client_secret": "secret", "expiry": "{}", "scopes": ["drive"]}}"#,
            expiry.to_rfc3339()
        ),
    )
    .unwrap();

    let user = AuthorizedUser::load(&path).unwrap();
    assert!(!user.is_expired(Utc::now()));
    assert!(user.is_expired(Utc::now() + Duration::minutes(29) + Duration::seconds(30)));
    assert!(user.can_refresh());

    // Unknown fields survive a save
    user.save(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("scopes"));
}

#[test]
fn test_missing_credentials_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = AuthorizedUser::load(&temp_dir.path().join("token.json")).unwrap_err();
    assert!(err.to_string().contains("Google credentials not readable"));
}

#[tokio::test]
async fn test_run_command_missing_binary() {
    let err = run_command("definitely-not-a-real-binary-xyz", &[], 5, false)
        .await
        .unwrap_err();
    assert!(err.contains("was not found on PATH"));
}

#[tokio::test]
async fn test_renderer_reports_missing_mmdc() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = MermaidCli::new(
        RendererConfig {
            mmdc_path: "definitely-not-mmdc-xyz".to_string(),
            ..RendererConfig::default()
        },
        false,
    );

    let err = renderer
        .render("graph TD\nA-->B", &temp_dir.path().join("out.png"))
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Error rendering Mermaid diagram"));
    assert!(message.contains("mermaid-cli"));
}

#[tokio::test]
async fn test_converter_reports_missing_pandoc() {
    let temp_dir = TempDir::new().unwrap();
    let markdown = temp_dir.path().join("p.md");
    fs::write(&markdown, "# Title").unwrap();

    let converter = PandocConverter::new(
        ConverterConfig {
            pandoc_path: "definitely-not-pandoc-xyz".to_string(),
            ..ConverterConfig::default()
        },
        false,
    );

    let err = converter
        .markdown_to_docx(&markdown, &temp_dir.path().join("p.docx"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("was not found on PATH"));
}
