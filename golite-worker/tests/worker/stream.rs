use golite_worker::{FileStore, SessionRegistry};
use serde_json::json;

use crate::common::{action, memory_registry, play, run_lines};

#[tokio::test]
async fn capture_game() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            play("g", 1, -1, 0, 0),
            play("g", 2, 1, 0, 1),
            play("g", 3, 1, 1, 0),
            json!({"session": "g", "action": "get", "row": 0, "col": 0}).to_string(),
            action("g", "score"),
        ],
    )
    .await;

    assert_eq!(replies.len(), 5);
    for reply in &replies[..3] {
        assert_eq!(reply["kind"], "event");
        assert_eq!(reply["accepted"], true);
    }
    assert_eq!(
        replies[3],
        json!({"kind": "cell", "session": "g", "row": 0, "col": 0, "owner": 0})
    );
    assert_eq!(replies[4]["kind"], "score");
    assert_eq!(replies[4]["black"], 2);
    assert_eq!(replies[4]["white"], 0);
    assert_eq!(replies[4]["empty"], 79);
    assert_eq!(replies[4]["text"], "Black: 2 White: 0");
}

#[tokio::test]
async fn occupied_point_is_not_accepted() {
    let registry = memory_registry();
    let replies = run_lines(&registry, &[play("g", 1, 1, 4, 4), play("g", 2, -1, 4, 4)]).await;
    assert_eq!(replies[0]["accepted"], true);
    assert_eq!(replies[1]["accepted"], false);
    assert_eq!(replies[1]["timestamp"], 2);
}

#[tokio::test]
async fn undo_and_show() {
    let registry = SessionRegistry::new(golite_worker::MemoryStore::new(), 7);
    let replies = run_lines(
        &registry,
        &[
            play("g", 1, 1, 0, 0),
            play("g", 2, -1, 0, 6),
            json!({"session": "g", "action": "undo", "timestamp": 3}).to_string(),
            action("g", "show"),
        ],
    )
    .await;

    assert_eq!(replies[2]["kind"], "event");
    assert_eq!(replies[2]["accepted"], true);
    assert_eq!(replies[3]["kind"], "board");
    assert_eq!(replies[3]["size"], 7);

    let board = replies[3]["board"].as_str().unwrap();
    let rows: Vec<&str> = board.lines().collect();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0], "B E E E E E E ");
    assert_eq!(rows[6], "E E E E E E E ");
}

#[tokio::test]
async fn far_off_board_move_is_rejected_not_an_error() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            play("g", 1, 1, 12, 0),
            play("g", 2, 1, 300, 0),
            json!({"session": "g", "action": "get", "row": 300, "col": 4}).to_string(),
        ],
    )
    .await;

    assert_eq!(replies[0]["kind"], "event");
    assert_eq!(replies[0]["accepted"], false);
    assert_eq!(
        replies[1],
        json!({"kind": "event", "session": "g", "timestamp": 2, "accepted": false})
    );
    assert_eq!(replies[2]["kind"], "cell");
    assert_eq!(replies[2]["row"], 300);
    assert!(replies[2]["owner"].is_null());
}

#[tokio::test]
async fn far_off_board_move_cancels_new_game() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            json!({"session": "g", "action": "new_game", "size": 13}).to_string(),
            play("g", 1, 1, 1000, 0),
            action("g", "confirm_new"),
        ],
    )
    .await;

    assert_eq!(replies[0]["kind"], "confirm_needed");
    assert_eq!(replies[1]["accepted"], false);
    assert_eq!(replies[2]["kind"], "error");
}

#[tokio::test]
async fn reads_on_unknown_session_keep_registry_empty() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            action("ghost", "show"),
            action("ghost", "score"),
            json!({"session": "ghost", "action": "get", "row": 1, "col": 1}).to_string(),
        ],
    )
    .await;

    assert_eq!(replies[0]["kind"], "board");
    assert_eq!(replies[1]["empty"], 81);
    assert_eq!(replies[2]["owner"], 0);
    assert!(registry.is_empty().await);
    assert!(registry.store().is_empty().await);
}

#[tokio::test]
async fn off_board_cell_is_null() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[json!({"session": "g", "action": "get", "row": 9, "col": 2}).to_string()],
    )
    .await;
    assert_eq!(replies[0]["kind"], "cell");
    assert!(replies[0]["owner"].is_null());
}

#[tokio::test]
async fn new_game_needs_confirmation() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            play("g", 1, 1, 3, 3),
            json!({"session": "g", "action": "new_game", "size": 13}).to_string(),
            action("g", "confirm_new"),
            action("g", "confirm_new"),
        ],
    )
    .await;

    assert_eq!(
        replies[1],
        json!({"kind": "confirm_needed", "session": "g", "size": 13})
    );
    assert_eq!(replies[2]["kind"], "board");
    assert_eq!(replies[2]["size"], 13);
    assert!(!replies[2]["board"].as_str().unwrap().contains('B'));
    assert_eq!(replies[3]["kind"], "error");
}

#[tokio::test]
async fn other_commands_cancel_new_game() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            json!({"session": "g", "action": "new_game", "size": 19}).to_string(),
            action("g", "show"),
            action("g", "confirm_new"),
        ],
    )
    .await;

    assert_eq!(replies[0]["kind"], "confirm_needed");
    assert_eq!(replies[1]["size"], 9);
    assert_eq!(replies[2]["kind"], "error");
}

#[tokio::test]
async fn bad_new_game_size_is_an_error() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[json!({"session": "g", "action": "new_game", "size": 8}).to_string()],
    )
    .await;
    assert_eq!(replies[0]["kind"], "error");
    assert!(replies[0]["message"].as_str().unwrap().contains('8'));
}

#[tokio::test]
async fn malformed_lines_do_not_stop_the_loop() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            "this is not json".to_string(),
            String::new(),
            json!({"action": "show"}).to_string(),
            json!({"session": "g", "action": "pass"}).to_string(),
            play("g", 1, 1, 0, 0),
        ],
    )
    .await;

    // the blank line gets no reply
    assert_eq!(replies.len(), 4);
    for reply in &replies[..3] {
        assert_eq!(reply["kind"], "error");
        assert!(reply["message"].is_string());
    }
    assert_eq!(replies[3]["accepted"], true);
}

#[tokio::test]
async fn sessions_are_independent() {
    let registry = memory_registry();
    let replies = run_lines(
        &registry,
        &[
            play("a", 1, 1, 0, 0),
            play("b", 1, -1, 0, 0),
            action("a", "score"),
            action("b", "score"),
        ],
    )
    .await;

    assert_eq!(replies[0]["accepted"], true);
    assert_eq!(replies[1]["accepted"], true);
    assert_eq!(replies[2]["black"], 1);
    assert_eq!(replies[3]["white"], 1);
}

#[tokio::test]
async fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let registry = SessionRegistry::new(FileStore::new(dir.path()), 9);
    run_lines(&registry, &[play("chat-1", 1, 1, 2, 2), play("chat-1", 2, -1, 6, 6)]).await;

    let registry = SessionRegistry::new(FileStore::new(dir.path()), 9);
    let replies = run_lines(
        &registry,
        &[
            json!({"session": "chat-1", "action": "get", "row": 6, "col": 6}).to_string(),
            action("chat-1", "score"),
        ],
    )
    .await;

    assert_eq!(replies[0]["owner"], -1);
    assert_eq!(replies[1]["black"], 1);
    assert_eq!(replies[1]["white"], 1);
}
