//! Ctl command handler - sends commands to the running agent

use super::args::CtlAction;
use super::presenter::Presenter;
use super::socket::{AgentSocketClient, SocketPath};

/// Handle ctl subcommand
pub async fn handle_ctl_command(action: CtlAction, presenter: &Presenter) -> Result<(), String> {
    let client = AgentSocketClient::new(SocketPath::new());

    // Check if agent is running
    if !client.is_agent_running() {
        return Err("No agent running. Start with: clipstack".to_string());
    }

    let cmd = command_line(&action);
    let response = client
        .send_command(&cmd)
        .await
        .map_err(|e| format!("Failed to communicate with agent: {}", e))?;

    let response = response.trim();
    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    match action {
        // Machine-readable output goes to stdout untouched
        CtlAction::List | CtlAction::Status => presenter.output(response),
        _ => presenter.info(&format!("Command sent: {}", cmd)),
    }

    Ok(())
}

/// Wire form of a ctl action
fn command_line(action: &CtlAction) -> String {
    match action {
        CtlAction::Toggle => "toggle".to_string(),
        CtlAction::Show { app: None } => "show".to_string(),
        CtlAction::Show { app: Some(app) } => format!("show {}", app),
        CtlAction::Hide => "hide".to_string(),
        CtlAction::Select { index } => format!("select {}", index),
        CtlAction::Search { query } => match query {
            Some(query) => format!("search {}", query),
            None => "search".to_string(),
        },
        CtlAction::Filter { filter } => format!("filter {}", filter),
        CtlAction::List => "list".to_string(),
        CtlAction::Status => "status".to_string(),
        CtlAction::Remove { index } => format!("remove {}", index),
        CtlAction::Clear => "clear".to_string(),
        CtlAction::RebindBegin => "rebind-begin".to_string(),
        CtlAction::RebindKey {
            key_code,
            modifiers,
        } => format!("rebind-key {} {}", key_code, modifiers),
        CtlAction::RebindCancel => "rebind-cancel".to_string(),
    }
}
