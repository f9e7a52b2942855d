use chrono::Utc;
use golite_engine::{Event, Owner, Session, Stone};
use golite_worker::{FileStore, SessionRecord, SessionStore};

fn record(key: &str) -> SessionRecord {
    let mut session = Session::new(9).unwrap();
    session.play(1, Stone::Black, 2, 3).unwrap();
    session.undo(2).unwrap();
    session.play(3, Stone::White, 4, 4).unwrap();
    SessionRecord::capture(key, &session)
}

#[tokio::test]
async fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let saved = record("chat-7");
    store.save(&saved).await.unwrap();

    assert!(dir.path().join("chat-7.json").exists());
    let loaded = store.load("chat-7").await.unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.events[1], Event::undo(2));
}

#[tokio::test]
async fn missing_key_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert!(store.load("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn unreadable_record_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for("broken"), b"{\"key\": \"broken\", \"size\":").unwrap();
    assert!(store.load("broken").await.unwrap().is_none());
}

#[tokio::test]
async fn save_creates_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("games"));
    store.save(&record("k")).await.unwrap();
    assert!(store.load("k").await.unwrap().is_some());
}

#[tokio::test]
async fn save_overwrites_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.save(&record("k")).await.unwrap();
    let newer = SessionRecord {
        key: "k".to_string(),
        size: 13,
        events: Vec::new(),
        updated_at: Utc::now(),
    };
    store.save(&newer).await.unwrap();

    assert_eq!(store.load("k").await.unwrap().unwrap().size, 13);
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["k.json".to_string()]);
}

#[tokio::test]
async fn unsafe_keys_stay_inside_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.save(&record("../escape")).await.unwrap();
    assert!(store.path_for("../escape").starts_with(dir.path()));
    assert!(!dir.path().parent().unwrap().join("escape.json").exists());
    assert_eq!(store.load("../escape").await.unwrap().unwrap().key, "../escape");
}

#[test]
fn record_rebuilds_session() {
    let restored = record("k").into_session().unwrap();
    assert_eq!(restored.events().len(), 3);
    assert_eq!(restored.get(2, 3), Some(Owner::Empty));
    assert_eq!(restored.get(4, 4), Some(Owner::Stone(Stone::White)));
}
