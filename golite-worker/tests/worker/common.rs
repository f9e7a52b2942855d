#![allow(dead_code)]

use golite_worker::{MemoryStore, SessionRegistry, worker};
use serde_json::Value;
use tokio::io::BufReader;

pub fn memory_registry() -> SessionRegistry<MemoryStore> {
    SessionRegistry::new(MemoryStore::new(), 9)
}

/// Feed `lines` through the worker loop and parse every reply line.
pub async fn run_lines<S: golite_worker::SessionStore>(
    registry: &SessionRegistry<S>,
    lines: &[String],
) -> Vec<Value> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    worker::run(registry, BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

pub fn play(session: &str, timestamp: u64, stone: i8, row: u32, col: u32) -> String {
    serde_json::json!({
        "session": session,
        "action": "move",
        "timestamp": timestamp,
        "stone": stone,
        "row": row,
        "col": col,
    })
    .to_string()
}

pub fn action(session: &str, name: &str) -> String {
    serde_json::json!({"session": session, "action": name}).to_string()
}
