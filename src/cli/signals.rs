//! OS signal handling for the agent

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc::UnboundedSender;

use crate::application::events::EngineEvent;

/// Forward SIGINT and SIGTERM into the engine's event queue as
/// shutdown events, so teardown runs through the same serialized
/// path as everything else.
pub fn spawn_signal_listeners(
    events: UnboundedSender<EngineEvent>,
) -> Result<(), std::io::Error> {
    let tx_int = events.clone();
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        sigint.recv().await;
        eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
        let _ = tx_int.send(EngineEvent::Shutdown);
    });

    let tx_term = events;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        sigterm.recv().await;
        eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
        let _ = tx_term.send(EngineEvent::Shutdown);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn listeners_install_without_error() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(spawn_signal_listeners(tx).is_ok());
    }
}
