mod common;

use common::{
    text_response, toolbox, CopyConverter, FailingRenderer, FakePublisher, ScriptedModel,
};
use proposal_agent::generators::{
    document_title, generate_cover_letter, generate_google_doc, generate_mermaid_diagram,
    strip_code_fences, CoverLetterRequest, DiagramRequest, GoogleDocRequest, Toolbox,
};
use proposal_agent::models::{Artifact, ProposalState};
use proposal_agent::session::start_session;
use proposal_agent::storage::FileStore;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn session(temp_dir: &TempDir) -> (FileStore, ProposalState) {
    start_session(temp_dir.path(), "Automate lead scoring with n8n").unwrap()
}

#[test]
fn test_strip_code_fences() {
    assert_eq!(strip_code_fences("```mermaid\ngraph TD\nA-->B\n```"), "graph TD\nA-->B");
    assert_eq!(strip_code_fences("```\nplain\n```"), "plain");
    assert_eq!(strip_code_fences("  no fences  "), "no fences");
    assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```\n"), "{\"a\":1}");
}

#[test]
fn test_document_title() {
    assert_eq!(
        document_title("intro\n# Lead Scoring Proposal\n## Scope"),
        Some("Lead Scoring Proposal".to_string())
    );
    assert_eq!(document_title("## Only second level"), None);
}

#[tokio::test]
async fn test_cover_letter_parses_structured_output() {
    let temp_dir = TempDir::new().unwrap();
    let (store, state) = session(&temp_dir);
    let model = ScriptedModel::new(vec![text_response(
        "```json\n{\"proposal\": \"Hi, I can build this. $$$\"}\n```",
    )]);
    let tools = toolbox(model.clone());

    let request = CoverLetterRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: None,
    };
    let artifact = generate_cover_letter(&tools, &state, &request).await.unwrap();

    match &artifact {
        Artifact::CoverLetter { text, path } => {
            assert_eq!(text, "Hi, I can build this. $$$");
            assert_eq!(path, &store.cover_letter_path());
        }
        other => panic!("unexpected artifact: {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(store.cover_letter_path()).unwrap(),
        "Hi, I can build this. $$$"
    );

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].response_format.is_some());
    assert_eq!(requests[0].messages.len(), 2);
}

#[tokio::test]
async fn test_cover_letter_revision_includes_previous_text() {
    let temp_dir = TempDir::new().unwrap();
    let (_store, mut state) = session(&temp_dir);
    state.cover_letter = Some("Old letter".to_string());

    let model = ScriptedModel::new(vec![text_response("{\"proposal\": \"New letter\"}")]);
    let tools = toolbox(model.clone());

    let request = CoverLetterRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: Some("make it shorter".to_string()),
    };
    generate_cover_letter(&tools, &state, &request).await.unwrap();

    let requests = model.requests();
    let revision = requests[0].messages[1].content.clone().unwrap();
    assert!(revision.contains("Old letter"));
    assert!(revision.contains("make it shorter"));
}

#[tokio::test]
async fn test_diagram_without_job_folder_fails_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let state = ProposalState::new("20240501_101500", None);
    let model = ScriptedModel::new(vec![text_response("graph TD\nA-->B")]);
    let tools = toolbox(model.clone());

    let request = DiagramRequest {
        workflow_description: "A then B".to_string(),
        change_request: None,
    };
    let err = generate_mermaid_diagram(&tools, &state, &request)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("job_folder"));
    assert!(model.requests().is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_cover_letter_without_job_folder_fails_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let state = ProposalState::new("20240501_101500", None);
    let model = ScriptedModel::new(vec![text_response("{\"proposal\": \"Hi\"}")]);
    let tools = toolbox(model.clone());

    let request = CoverLetterRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: None,
    };
    let err = generate_cover_letter(&tools, &state, &request)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("job_folder"));
    assert!(model.requests().is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_google_doc_without_job_folder_fails_and_publishes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let state = ProposalState::new("20240501_101500", None);
    let model = ScriptedModel::new(vec![text_response("# Proposal")]);
    let publisher = FakePublisher::new(true);
    let tools = Toolbox::new(
        model.clone(),
        Arc::new(CopyConverter),
        publisher.clone(),
        Arc::new(common::FileRenderer),
    );

    let request = GoogleDocRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: None,
    };
    let err = generate_google_doc(&tools, &state, &request).await.unwrap_err();

    assert!(err.to_string().contains("job_folder"));
    assert!(model.requests().is_empty());
    assert!(publisher.titles.lock().unwrap().is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_diagram_code_is_saved_without_fences() {
    let temp_dir = TempDir::new().unwrap();
    let (store, state) = session(&temp_dir);
    let model = ScriptedModel::new(vec![text_response("```mermaid\ngraph TD\nA-->B\n```")]);
    let tools = toolbox(model);

    let request = DiagramRequest {
        workflow_description: "A then B".to_string(),
        change_request: None,
    };
    let artifact = generate_mermaid_diagram(&tools, &state, &request).await.unwrap();

    let (code_path, image_path) = store.mermaid_diagram_paths();
    assert_eq!(fs::read_to_string(&code_path).unwrap(), "graph TD\nA-->B");
    assert_eq!(
        artifact,
        Artifact::Diagram {
            code: "graph TD\nA-->B".to_string(),
            code_path,
            image_path: Some(image_path),
            render_error: None,
        }
    );
}

#[tokio::test]
async fn test_diagram_render_failure_still_returns_code() {
    let temp_dir = TempDir::new().unwrap();
    let (store, state) = session(&temp_dir);
    let model = ScriptedModel::new(vec![text_response("graph TD\nA-->B")]);
    let tools = Toolbox::new(
        model,
        Arc::new(CopyConverter),
        FakePublisher::new(true),
        Arc::new(FailingRenderer),
    );

    let request = DiagramRequest {
        workflow_description: "A then B".to_string(),
        change_request: None,
    };
    let artifact = generate_mermaid_diagram(&tools, &state, &request).await.unwrap();

    match &artifact {
        Artifact::Diagram {
            image_path,
            render_error,
            ..
        } => {
            assert!(image_path.is_none());
            assert!(render_error.as_deref().unwrap().contains("Error rendering Mermaid diagram"));
        }
        other => panic!("unexpected artifact: {:?}", other),
    }
    assert!(store.mermaid_diagram_paths().0.exists());
    assert!(artifact.tool_output().contains("Error rendering Mermaid diagram"));
}

#[tokio::test]
async fn test_failed_revision_render_removes_previous_image() {
    let temp_dir = TempDir::new().unwrap();
    let (store, mut state) = session(&temp_dir);
    let (_code_path, image_path) = store.mermaid_diagram_paths();
    fs::write(&image_path, "old png").unwrap();
    state.mermaid_code = Some("graph TD\nA-->B".to_string());
    state.mermaid_image = Some(image_path.clone());

    let model = ScriptedModel::new(vec![text_response("graph TD\nA-->C")]);
    let tools = Toolbox::new(
        model,
        Arc::new(CopyConverter),
        FakePublisher::new(true),
        Arc::new(FailingRenderer),
    );

    let request = DiagramRequest {
        workflow_description: "A then C".to_string(),
        change_request: Some("point to C".to_string()),
    };
    let artifact = generate_mermaid_diagram(&tools, &state, &request).await.unwrap();
    state.apply(&artifact);

    assert!(!image_path.exists());
    assert!(state.mermaid_image.is_none());
    assert_eq!(state.mermaid_code.as_deref(), Some("graph TD\nA-->C"));
}

#[tokio::test]
async fn test_google_doc_publishes_converted_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let (store, state) = session(&temp_dir);
    let model = ScriptedModel::new(vec![text_response(
        "```markdown\n# Lead Scoring Proposal\n\nPlan.\n```",
    )]);
    let publisher = FakePublisher::new(true);
    let tools = Toolbox::new(
        model,
        Arc::new(CopyConverter),
        publisher.clone(),
        Arc::new(common::FileRenderer),
    );

    let request = GoogleDocRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: None,
    };
    let artifact = generate_google_doc(&tools, &state, &request).await.unwrap();

    let (md, docx) = store.google_doc_paths();
    assert_eq!(fs::read_to_string(&md).unwrap(), "# Lead Scoring Proposal\n\nPlan.");
    assert!(docx.exists());
    assert_eq!(
        publisher.titles.lock().unwrap().clone(),
        vec!["Lead Scoring Proposal".to_string()]
    );
    assert!(artifact
        .tool_output()
        .contains("https://docs.google.com/document/d/doc-1/edit"));
}

#[tokio::test]
async fn test_google_doc_without_template_fails_before_model_call() {
    let temp_dir = TempDir::new().unwrap();
    let (store, state) = session(&temp_dir);
    let model = ScriptedModel::new(vec![text_response("# Proposal")]);
    let tools = Toolbox::new(
        model.clone(),
        Arc::new(CopyConverter),
        FakePublisher::new(false),
        Arc::new(common::FileRenderer),
    );

    let request = GoogleDocRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: None,
    };
    let err = generate_google_doc(&tools, &state, &request).await.unwrap_err();

    assert!(err.to_string().contains("GOOGLE_DOC_TEMPLATE_ID"));
    assert!(model.requests().is_empty());
    assert!(!store.google_doc_paths().0.exists());
}

#[tokio::test]
async fn test_regeneration_replaces_previous_value() {
    let temp_dir = TempDir::new().unwrap();
    let (store, mut state) = session(&temp_dir);
    let model = ScriptedModel::new(vec![
        text_response("{\"proposal\": \"First\"}"),
        text_response("{\"proposal\": \"Second\"}"),
    ]);
    let tools = toolbox(model);

    let request = CoverLetterRequest {
        job_description: "Automate lead scoring with n8n".to_string(),
        change_request: None,
    };
    let first = generate_cover_letter(&tools, &state, &request).await.unwrap();
    state.apply(&first);
    assert_eq!(state.cover_letter.as_deref(), Some("First"));

    let second = generate_cover_letter(&tools, &state, &request).await.unwrap();
    state.apply(&second);
    assert_eq!(state.cover_letter.as_deref(), Some("Second"));
    assert_eq!(
        fs::read_to_string(store.cover_letter_path()).unwrap(),
        "Second"
    );
}
