//! Agent runner - owns the engine and drains its event queue

use std::process::ExitCode;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{interval, MissedTickBehavior};

use crate::application::coordinator::{EngineSettings, PopupCoordinator};
use crate::application::events::EngineEvent;
use crate::application::ports::{
    AccessibilityProbe, ConfigStore, Pasteboard, PasteKeystroke, Workspace,
};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::hotkey::{CaptureOutcome, HotkeyBinding};
use crate::infrastructure::{
    create_paste_keystroke, create_pasteboard, create_workspace, GlobalHotkeyService,
    SystemAccessibilityProbe, XdgConfigStore,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::spawn_signal_listeners;
use super::socket::{AgentSocketServer, SocketPath, StateSnapshot};

/// Accessibility polling cadence while the grant is outstanding
const PERMISSION_POLL_INTERVAL: Duration = Duration::from_secs(1);

type AgentEngine = PopupCoordinator<
    Box<dyn Pasteboard>,
    Box<dyn Workspace>,
    Box<dyn PasteKeystroke>,
    GlobalHotkeyService,
>;

/// Per-run bookkeeping that is not engine state
struct LoopState {
    hotkey_warned: bool,
}

/// Run the agent until a shutdown event arrives
pub async fn run_agent(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another agent is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    // Create adapters; the hotkey service forwards presses into the queue
    let hotkeys = GlobalHotkeyService::spawn(events_tx.clone());
    let binding = config.hotkey_or_default();
    let mut engine: AgentEngine = PopupCoordinator::new(
        create_pasteboard(),
        create_workspace(),
        create_paste_keystroke(),
        hotkeys,
        EngineSettings::from_config(&config),
        config.exclusions(),
        binding,
        std::process::id() as i32,
        events_tx.clone(),
    );
    engine.start().await;

    let probe = SystemAccessibilityProbe::new();
    let store = XdgConfigStore::new();

    // Setup signal handlers
    if let Err(e) = spawn_signal_listeners(events_tx.clone()) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // Setup control socket
    let snapshot = StateSnapshot::default();
    let mut socket_server = AgentSocketServer::new(SocketPath::new());
    if let Err(e) = socket_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let socket_path = socket_server.path().to_path_buf();
    {
        let events = events_tx.clone();
        let snapshot = snapshot.clone();
        tokio::spawn(async move {
            let _ = socket_server.run(events, snapshot).await;
        });
    }

    // Timer producers feed the same queue as everything else
    spawn_ticker(
        events_tx.clone(),
        config.poll_interval_or_default(),
        EngineEvent::ClipboardTick,
    );
    spawn_ticker(
        events_tx.clone(),
        PERMISSION_POLL_INTERVAL,
        EngineEvent::PermissionTick,
    );

    presenter.agent_status("Started, watching the clipboard...");
    presenter.info(&format!(
        "PID: {} | Socket: {} | Hotkey: {} | SIGINT: exit",
        std::process::id(),
        socket_path.display(),
        binding
    ));

    snapshot.publish(engine.status(), engine.list_view());

    // Main event loop: one event at a time, run to completion
    let mut state = LoopState {
        hotkey_warned: false,
    };
    while let Some(event) = events_rx.recv().await {
        let keep_running =
            dispatch(&mut engine, &probe, &store, &presenter, &mut state, event).await;
        snapshot.publish(engine.status(), engine.list_view());
        if !keep_running {
            break;
        }
    }

    presenter.agent_status("Shutting down...");
    engine.stop().await;
    let _ = pid_file.release();

    ExitCode::from(EXIT_SUCCESS)
}

fn spawn_ticker(events: UnboundedSender<EngineEvent>, period: Duration, event: EngineEvent) {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if events.send(event.clone()).is_err() {
                break;
            }
        }
    });
}

/// Apply one event to the engine; false ends the agent loop
async fn dispatch<S: ConfigStore>(
    engine: &mut AgentEngine,
    probe: &SystemAccessibilityProbe,
    store: &S,
    presenter: &Presenter,
    state: &mut LoopState,
    event: EngineEvent,
) -> bool {
    match event {
        EngineEvent::ClipboardTick => {
            engine.clipboard_tick().await;
        }
        EngineEvent::PermissionTick => {
            let granted = probe.is_granted().await;
            match engine.permission_tick(granted).await {
                Some(true) => {
                    state.hotkey_warned = false;
                    presenter.success(&format!(
                        "Hotkey registered: {}",
                        engine.status().binding
                    ));
                }
                Some(false) => {
                    if !state.hotkey_warned {
                        state.hotkey_warned = true;
                        presenter.warn(
                            "Hotkey registration failed; popup stays reachable via 'clipstack ctl toggle'",
                        );
                    }
                }
                None => {}
            }
        }
        EngineEvent::HotkeyPressed => engine.hotkey_pressed().await,
        EngineEvent::TogglePopup => engine.toggle_popup().await,
        EngineEvent::ShowPopup { handoff } => engine.open_from_external(handoff).await,
        EngineEvent::HidePopup => engine.escape().await,
        EngineEvent::SelectItem(index) => engine.select_item(index).await,
        EngineEvent::SetSearch(query) => engine.set_search(query),
        EngineEvent::SetFilter(filter) => engine.set_filter(filter),
        EngineEvent::RemoveItem(index) => {
            engine.remove_item(index);
        }
        EngineEvent::ClearHistory => engine.clear_history(),
        EngineEvent::BeginCapture => {
            if let Err(e) = engine.begin_capture().await {
                presenter.warn(&e.to_string());
            }
        }
        EngineEvent::CaptureKey {
            key_code,
            modifiers,
        } => match engine.observe_capture_key(key_code, modifiers).await {
            Ok(CaptureOutcome::Accepted(binding)) => {
                presenter.success(&format!("Hotkey rebound: {}", binding));
                if let Err(e) = persist_binding(store, binding).await {
                    presenter.warn(&format!("Could not persist new hotkey: {}", e));
                }
            }
            Ok(CaptureOutcome::Ignored) => {}
            Err(e) => presenter.warn(&e.to_string()),
        },
        EngineEvent::CancelCapture => {
            if let Err(e) = engine.cancel_capture().await {
                presenter.warn(&e.to_string());
            }
        }
        EngineEvent::RestoreFocus { epoch, attempt } => {
            engine.restore_focus(epoch, attempt).await
        }
        EngineEvent::SendPaste { epoch } => {
            engine.send_paste(epoch).await;
        }
        EngineEvent::Shutdown => return false,
    }
    true
}

/// Write an accepted rebind back to the config file
async fn persist_binding<S: ConfigStore>(
    store: &S,
    binding: HotkeyBinding,
) -> Result<(), ConfigError> {
    let mut config = store.load().await?;
    config.hotkey_key_code = Some(binding.key_code);
    config.hotkey_modifiers = Some(binding.modifiers);
    store.save(&config).await
}
