use chrono::Local;
use proposal_agent::models::{Message, ProposalState, ToolCall};
use proposal_agent::session::{
    last_reply, resume_session, start_session, CheckpointStore, FilesystemCheckpointStore,
    MemoryCheckpointStore,
};
use tempfile::TempDir;

fn create_test_state(thread_id: &str, age_minutes: i64) -> ProposalState {
    let mut state = ProposalState::new(thread_id, None);
    state.last_updated = Local::now() - chrono::Duration::minutes(age_minutes);
    state.messages.push(Message::user("job"));
    state.messages.push(Message::assistant("draft ready"));
    state.cover_letter = Some("Dear client".to_string());
    state
}

#[test]
fn test_filesystem_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemCheckpointStore::new(temp_dir.path());

    let state = create_test_state("20240501_101500", 0);
    store.save(&state).unwrap();

    assert!(temp_dir
        .path()
        .join("20240501_101500")
        .join("checkpoint.json")
        .exists());

    let loaded = store.load("20240501_101500").unwrap();
    assert_eq!(loaded.thread_id, "20240501_101500");
    assert_eq!(loaded.messages, state.messages);
    assert_eq!(loaded.cover_letter.as_deref(), Some("Dear client"));
}

#[test]
fn test_filesystem_load_missing() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemCheckpointStore::new(temp_dir.path());
    assert!(store.load("nope").is_none());
}

#[test]
fn test_filesystem_list_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemCheckpointStore::new(temp_dir.path());

    store.save(&create_test_state("20240501_090000", 30)).unwrap();
    store.save(&create_test_state("20240501_100000", 0)).unwrap();
    store.save(&create_test_state("20240501_080000", 60)).unwrap();

    // A folder without a checkpoint is ignored
    std::fs::create_dir_all(temp_dir.path().join("stray")).unwrap();

    assert_eq!(
        store.list(),
        vec!["20240501_100000", "20240501_090000", "20240501_080000"]
    );
}

#[test]
fn test_list_missing_base_dir() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemCheckpointStore::new(temp_dir.path().join("missing"));
    assert!(store.list().is_empty());
}

#[test]
fn test_memory_store() {
    let store = MemoryCheckpointStore::new();
    store.save(&create_test_state("a", 10)).unwrap();
    store.save(&create_test_state("b", 0)).unwrap();

    let mut updated = create_test_state("a", 0);
    updated.cover_letter = Some("Revised".to_string());
    store.save(&updated).unwrap();

    assert_eq!(store.load("a").unwrap().cover_letter.as_deref(), Some("Revised"));
    assert_eq!(store.list().len(), 2);
    assert!(store.load("c").is_none());
}

#[test]
fn test_resume_session() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoints = FilesystemCheckpointStore::new(temp_dir.path());
    let (store, state) = start_session(temp_dir.path(), "Build a bot").unwrap();
    checkpoints.save(&state).unwrap();

    let (resumed_store, resumed) =
        resume_session(&checkpoints, temp_dir.path(), store.timestamp()).unwrap();
    assert_eq!(resumed_store, store);
    assert_eq!(resumed.job_description.as_deref(), Some("Build a bot"));

    assert!(resume_session(&checkpoints, temp_dir.path(), "19990101_000000").is_err());
}

#[test]
fn test_last_reply_skips_tool_call_messages() {
    let state = create_test_state("x", 0);
    let mut messages = state.messages.clone();
    messages.push(Message::assistant_tool_calls(
        None,
        vec![ToolCall::function("call_1", "generate_cover_letter", "{}".to_string())],
    ));
    messages.push(Message::tool_result("call_1", "ok"));

    assert_eq!(last_reply(&messages), Some("draft ready"));
}
