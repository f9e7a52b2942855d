use golite_worker::{Config, FileStore, MemoryStore, SessionRegistry, StoreKind, worker};
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    // stdout carries replies, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "golite_worker=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    let result = match config.store {
        StoreKind::File => {
            tracing::info!(
                "Starting golite-worker with saves in {} (default size {})",
                config.save_dir.display(),
                config.board_size
            );
            let store = FileStore::new(config.save_dir.clone());
            let registry = SessionRegistry::new(store, config.board_size);
            worker::run(&registry, input, output).await
        }
        StoreKind::Memory => {
            tracing::info!(
                "Starting golite-worker in memory (default size {})",
                config.board_size
            );
            let registry = SessionRegistry::new(MemoryStore::new(), config.board_size);
            worker::run(&registry, input, output).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Worker stopped: {e}");
        std::process::exit(1);
    }
}
