use sophi_application::{DebouncedPersister, SophiStore};
use sophi_core::conversation::Message;
use sophi_core::repository::DataRepository;
use sophi_core::state::SophiData;
use sophi_infrastructure::{InMemoryDataRepository, JsonDataRepository};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn stoic() -> Vec<String> {
    vec!["Stoic".to_string()]
}

#[tokio::test]
async fn test_burst_of_mutations_is_written_once() {
    let store = Arc::new(SophiStore::new(SophiData::new()));
    let repo = Arc::new(InMemoryDataRepository::new());
    let persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repo.clone(),
        Duration::from_millis(100),
    );

    let id = store
        .update(|d| d.create_conversation("burst", &stoic(), 1))
        .await
        .unwrap();
    for i in 0..5 {
        store
            .update(|d| d.append_message(&id, Message::user(format!("m{i}"), i), i))
            .await
            .unwrap();
    }

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(repo.save_count(), 1);
    let saved = repo.snapshot().await.unwrap();
    assert_eq!(saved.conversations[0].messages.len(), 5);
    assert_eq!(persister.written_revision(), store.revision());
}

#[tokio::test]
async fn test_steady_stream_of_mutations_is_still_written() {
    let store = Arc::new(SophiStore::new(SophiData::new()));
    let repo = Arc::new(InMemoryDataRepository::new());
    let _persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repo.clone(),
        Duration::from_millis(50),
    );

    // A change every 20ms never leaves a 50ms quiet gap.
    for i in 0..40 {
        store
            .update(|d| {
                d.set_user_prompt(&format!("draft {i}"));
                Ok(())
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert!(repo.save_count() >= 1);
}

#[tokio::test]
async fn test_flush_writes_immediately_and_only_when_dirty() {
    let store = Arc::new(SophiStore::new(SophiData::new()));
    let repo = Arc::new(InMemoryDataRepository::new());
    let persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repo.clone(),
        Duration::from_secs(60),
    );

    assert!(!persister.flush().await.unwrap());

    store
        .update(|d| {
            d.set_user_prompt("be brief");
            Ok(())
        })
        .await
        .unwrap();

    assert!(persister.flush().await.unwrap());
    assert_eq!(repo.save_count(), 1);
    assert_eq!(repo.snapshot().await.unwrap().user_prompt, "be brief");

    assert!(!persister.flush().await.unwrap());
    assert_eq!(repo.save_count(), 1);
}

#[tokio::test]
async fn test_failed_update_does_not_trigger_write() {
    let store = Arc::new(SophiStore::new(SophiData::new()));
    let repo = Arc::new(InMemoryDataRepository::new());
    let persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repo.clone(),
        Duration::from_millis(20),
    );

    let result = store.update(|d| d.delete_note("missing")).await;
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(repo.save_count(), 0);
    assert!(!persister.flush().await.unwrap());
}

#[tokio::test]
async fn test_save_failure_keeps_state_dirty() {
    let store = Arc::new(SophiStore::new(SophiData::new()));
    let repo = Arc::new(InMemoryDataRepository::new());
    let persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repo.clone(),
        Duration::from_secs(60),
    );

    store
        .update(|d| Ok(d.add_note("n", "c", 1)))
        .await
        .unwrap();

    repo.set_fail_saves(true);
    assert!(persister.flush().await.is_err());

    repo.set_fail_saves(false);
    assert!(persister.flush().await.unwrap());
    assert_eq!(repo.snapshot().await.unwrap().notes.len(), 1);
}

#[tokio::test]
async fn test_shutdown_persists_to_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sophi_data.json");
    let repo = Arc::new(JsonDataRepository::with_path(path.clone()));

    let store = Arc::new(SophiStore::new(SophiData::new()));
    let persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repo.clone(),
        Duration::from_secs(60),
    );
    store
        .update(|d| d.create_conversation("persist me", &stoic(), 7))
        .await
        .unwrap();
    persister.shutdown().await.unwrap();

    let loaded = JsonDataRepository::with_path(path.clone())
        .load()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.conversations.len(), 1);
    assert_eq!(loaded.conversations[0].title, "PERSIST ME...");
}
