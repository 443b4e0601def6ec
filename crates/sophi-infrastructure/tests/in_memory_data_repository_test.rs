use sophi_core::repository::DataRepository;
use sophi_core::state::SophiData;
use sophi_infrastructure::InMemoryDataRepository;

#[tokio::test]
async fn test_counts_saves_and_returns_last_snapshot() {
    let repo = InMemoryDataRepository::new();
    let mut data = SophiData::new();
    repo.save(&data).await.unwrap();
    data.set_user_prompt("second");
    repo.save(&data).await.unwrap();

    assert_eq!(repo.save_count(), 2);
    assert_eq!(repo.load().await.unwrap().unwrap().user_prompt, "second");
}

#[tokio::test]
async fn test_simulated_failure() {
    let repo = InMemoryDataRepository::new();
    repo.set_fail_saves(true);
    assert!(repo.save(&SophiData::new()).await.is_err());
    assert_eq!(repo.save_count(), 0);
    assert!(repo.snapshot().await.is_none());
}
