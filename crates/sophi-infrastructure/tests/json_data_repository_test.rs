use sophi_core::conversation::{Fallacy, Message, MessageMetadata};
use sophi_core::repository::DataRepository;
use sophi_core::state::SophiData;
use sophi_infrastructure::JsonDataRepository;
use tempfile::TempDir;

fn populated() -> SophiData {
    let mut data = SophiData::new();
    let id = data
        .create_conversation("Is virtue teachable?", &["Socratic".to_string()], 10)
        .unwrap();
    data.append_message(&id, Message::user("Is virtue teachable?", 11), 11)
        .unwrap();
    data.append_message(
        &id,
        Message::assistant(
            "What is virtue?",
            12,
            None,
            MessageMetadata {
                contradiction_detected: false,
                fallacies: vec![Fallacy {
                    name: "Begging the Question".into(),
                    definition: "Assuming the conclusion".into(),
                    example: "Virtue is teachable because it can be taught".into(),
                }],
                error: false,
            },
        ),
        12,
    )
    .unwrap();
    data.set_augmentation("Socratic", "Quote the Meno.");
    let note = data.add_note("Meno", "Recollection theory", 13);
    data.toggle_active_note(&note).unwrap();
    data
}

#[tokio::test]
async fn test_load_before_first_save_is_none() {
    let dir = TempDir::new().unwrap();
    let repo = JsonDataRepository::with_path(dir.path().join("data.json"));
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_then_load_restores_aggregate() {
    let dir = TempDir::new().unwrap();
    let repo = JsonDataRepository::with_path(dir.path().join("data.json"));
    let data = populated();

    repo.save(&data).await.unwrap();
    let loaded = repo.load().await.unwrap().unwrap();

    assert_eq!(loaded, data);
}

#[tokio::test]
async fn test_document_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let repo = JsonDataRepository::with_path(path.clone());
    repo.save(&populated()).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("currentConversationId").is_some());
    assert!(raw.get("activeContextNoteId").is_some());
    assert_eq!(raw["personaAugmentations"]["Socratic"], "Quote the Meno.");
    let message = &raw["conversations"][0]["messages"][1];
    assert_eq!(message["metadata"]["contradictionDetected"], false);
    assert_eq!(
        message["metadata"]["fallacies"][0]["name"],
        "Begging the Question"
    );
}

#[tokio::test]
async fn test_loads_document_written_by_browser_build() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{
            "conversations": [{
                "id": "c1", "title": "WHY...", "tags": [], "persona": "Stoic",
                "createdAt": 1, "updatedAt": 2,
                "messages": [
                    {"id": "m1", "role": "user", "content": "why", "timestamp": 1},
                    {"id": "m2", "role": "assistant", "content": "because", "timestamp": 2,
                     "metadata": {"contradictionDetected": true}}
                ]
            }],
            "concepts": [],
            "notes": [],
            "currentConversationId": "c1",
            "activePersona": "Stoic",
            "activeContextNoteId": null,
            "personaAugmentations": {},
            "userPersonality": "",
            "userPrompt": "terse"
        }"#,
    )
    .unwrap();

    let repo = JsonDataRepository::with_path(path);
    let data = repo.load().await.unwrap().unwrap();

    assert_eq!(data.user_prompt, "terse");
    assert!(!data.emoji_mode);
    let conv = data.current_conversation().unwrap();
    assert!(conv.messages[1].metadata.as_ref().unwrap().contradiction_detected);
}

#[tokio::test]
async fn test_corrupt_document_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ broken").unwrap();

    let err = JsonDataRepository::with_path(path).load().await.unwrap_err();
    assert!(err.is_serialization());
}
