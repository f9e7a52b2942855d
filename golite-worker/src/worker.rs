use golite_engine::Event;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{Action, Command, Reply};
use crate::error::WorkerError;
use crate::registry::SessionRegistry;
use crate::store::SessionStore;

/// Read one JSON command per line from `input` and write one JSON reply per
/// line to `output` until the input ends.
///
/// Bad lines and failed commands get an error reply; only stream I/O errors
/// stop the loop.
pub async fn run<S, R, W>(
    registry: &SessionRegistry<S>,
    input: R,
    mut output: W,
) -> Result<(), WorkerError>
where
    S: SessionStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.map_err(WorkerError::Stream)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = handle_line(registry, line).await;
        let mut out = reply.to_line();
        out.push('\n');
        output
            .write_all(out.as_bytes())
            .await
            .map_err(WorkerError::Stream)?;
        output.flush().await.map_err(WorkerError::Stream)?;
    }

    tracing::debug!("Input closed");
    Ok(())
}

pub async fn handle_line<S: SessionStore>(registry: &SessionRegistry<S>, line: &str) -> Reply {
    match Command::parse(line) {
        Ok(command) => handle(registry, command).await,
        Err(e) => {
            tracing::warn!("Rejecting command: {e}");
            Reply::error(e.to_string())
        }
    }
}

pub async fn handle<S: SessionStore>(registry: &SessionRegistry<S>, command: Command) -> Reply {
    let name = command.action.name();
    let session = command.session.clone();

    match dispatch(registry, command).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Error handling {name} for {session}: {e}");
            Reply::error(e.to_string())
        }
    }
}

async fn dispatch<S: SessionStore>(
    registry: &SessionRegistry<S>,
    Command { session, action }: Command,
) -> Result<Reply, WorkerError> {
    match action {
        Action::Move {
            timestamp,
            stone,
            row,
            col,
        } => {
            let (Ok(row), Ok(col)) = (u8::try_from(row), u8::try_from(col)) else {
                // past any board size
                registry.cancel_reset(&session).await?;
                tracing::warn!("{session}: {stone} at ({row}, {col}) is off the board");
                return Ok(Reply::Event {
                    session,
                    timestamp,
                    accepted: false,
                });
            };
            let event = Event::play(timestamp, stone, row, col);
            let accepted = registry.add_event(&session, event).await?;
            if accepted {
                tracing::debug!("{session}: {stone} plays ({row}, {col}) at {timestamp}");
            } else {
                tracing::warn!("{session}: {stone} at ({row}, {col}) rejected at {timestamp}");
            }
            Ok(Reply::Event {
                session,
                timestamp,
                accepted,
            })
        }
        Action::Undo { timestamp } => {
            let accepted = registry.add_event(&session, Event::undo(timestamp)).await?;
            tracing::debug!("{session}: undo at {timestamp}");
            Ok(Reply::Event {
                session,
                timestamp,
                accepted,
            })
        }
        Action::Show => {
            let (size, board) = registry.render(&session).await?;
            Ok(Reply::Board {
                session,
                size,
                board,
            })
        }
        Action::Get { row, col } => {
            let owner = match (u8::try_from(row), u8::try_from(col)) {
                (Ok(r), Ok(c)) => registry.get(&session, r, c).await?,
                _ => {
                    registry.cancel_reset(&session).await?;
                    None
                }
            };
            Ok(Reply::cell(&session, row, col, owner))
        }
        Action::Score => {
            let score = registry.score(&session).await?;
            Ok(Reply::score(&session, &score))
        }
        Action::NewGame { size } => {
            let size = registry.request_reset(&session, size).await?;
            tracing::debug!("{session}: new {size}x{size} game awaits confirmation");
            Ok(Reply::ConfirmNeeded { session, size })
        }
        Action::ConfirmNew => match registry.confirm_reset(&session).await? {
            Some(size) => {
                tracing::info!("{session}: started a new {size}x{size} game");
                let (size, board) = registry.render(&session).await?;
                Ok(Reply::Board {
                    session,
                    size,
                    board,
                })
            }
            None => Ok(Reply::error("No new game to confirm")),
        },
    }
}
