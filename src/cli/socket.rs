//! Unix Domain Socket control channel for the agent
//!
//! External surfaces (the popup renderer, scripts, the `ctl`
//! subcommand) talk to the running agent through line-oriented
//! commands. Mutating commands are acknowledged immediately and
//! applied asynchronously through the engine's event queue; reads
//! answer from the latest published state snapshot.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc::UnboundedSender;

use crate::application::coordinator::{EngineStatus, ItemView};
use crate::application::events::EngineEvent;
use crate::domain::clipboard::ContentFilter;
use crate::domain::focus::AppHandle;

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("clipstack.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("clipstack.sock"));
        Self { path }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine state published by the agent loop after each event, so
/// read commands answer without crossing into the actor.
#[derive(Clone, Default)]
pub struct StateSnapshot {
    inner: Arc<RwLock<SnapshotData>>,
}

#[derive(Default)]
struct SnapshotData {
    status: Option<EngineStatus>,
    items: Vec<ItemView>,
}

impl StateSnapshot {
    pub fn publish(&self, status: EngineStatus, items: Vec<ItemView>) {
        if let Ok(mut data) = self.inner.write() {
            data.status = Some(status);
            data.items = items;
        }
    }

    fn status_line(&self) -> String {
        let Ok(data) = self.inner.read() else {
            return "error: snapshot unavailable".to_string();
        };
        match &data.status {
            Some(status) => format!(
                "visible={} selected={} filter={} history={} permission={} hotkey={} capture={} previous={}",
                status.popup_visible,
                status.selected,
                status.filter,
                status.history_len,
                status.permission_granted,
                status.binding,
                status.capture_state,
                status.previous_app.as_deref().unwrap_or("none"),
            ),
            None => "starting".to_string(),
        }
    }

    fn list_json(&self) -> String {
        let Ok(data) = self.inner.read() else {
            return "[]".to_string();
        };
        serde_json::to_string(&data.items).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Agent socket server - listens for commands and feeds the engine
pub struct AgentSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl AgentSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }

    /// Bind to the socket
    pub fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        self.socket_path.path()
    }

    /// Accept and handle connections.
    ///
    /// Runs in a loop; each parsed command is sent into the engine's
    /// event queue, and reads answer from `snapshot`.
    pub async fn run(
        &self,
        events: UnboundedSender<EngineEvent>,
        snapshot: StateSnapshot,
    ) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let events = events.clone();
                    let snapshot = snapshot.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, events, snapshot).await {
                            eprintln!("Socket connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("Socket accept error: {}", e);
                }
            }
        }
    }

    /// Cleanup socket file
    pub fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

impl Drop for AgentSocketServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: UnixStream,
    events: UnboundedSender<EngineEvent>,
    snapshot: StateSnapshot,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;
    let response = respond(line.trim(), &events, &snapshot);

    writer.write_all(response.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    Ok(())
}

/// Parse one command line and produce its response
fn respond(
    line: &str,
    events: &UnboundedSender<EngineEvent>,
    snapshot: &StateSnapshot,
) -> String {
    match parse_command(line) {
        Ok(Command::Event(event)) => {
            if events.send(event).is_ok() {
                "ok".to_string()
            } else {
                "error: agent is shutting down".to_string()
            }
        }
        Ok(Command::Status) => snapshot.status_line(),
        Ok(Command::List) => snapshot.list_json(),
        Err(message) => format!("error: {}", message),
    }
}

enum Command {
    Event(EngineEvent),
    Status,
    List,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb {
        "toggle" => EngineEvent::TogglePopup,
        "show" => EngineEvent::ShowPopup {
            handoff: if rest.is_empty() {
                None
            } else {
                Some(AppHandle::with_identifier(rest))
            },
        },
        "hide" => EngineEvent::HidePopup,
        "select" => EngineEvent::SelectItem(parse_index(rest)?),
        "search" => EngineEvent::SetSearch(rest.to_string()),
        "filter" => {
            let filter: ContentFilter = rest.parse()?;
            EngineEvent::SetFilter(filter)
        }
        "remove" => EngineEvent::RemoveItem(parse_index(rest)?),
        "clear" => EngineEvent::ClearHistory,
        "rebind-begin" => EngineEvent::BeginCapture,
        "rebind-key" => {
            let mut parts = rest.split_whitespace();
            let key_code = parse_u32(parts.next())?;
            let modifiers = parse_u32(parts.next())?;
            EngineEvent::CaptureKey {
                key_code,
                modifiers,
            }
        }
        "rebind-cancel" => EngineEvent::CancelCapture,
        "status" => return Ok(Command::Status),
        "list" => return Ok(Command::List),
        "" => return Err("empty command".to_string()),
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Command::Event(event))
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("expected an index, got '{}'", value))
}

fn parse_u32(value: Option<&str>) -> Result<u32, String> {
    let value = value.ok_or_else(|| "missing argument".to_string())?;
    value
        .parse()
        .map_err(|_| format!("expected a number, got '{}'", value))
}

/// Agent socket client - connects and sends commands
pub struct AgentSocketClient {
    socket_path: SocketPath,
}

impl AgentSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }

    /// Check if the agent appears to be running (socket exists)
    pub fn is_agent_running(&self) -> bool {
        self.socket_path.exists()
    }

    /// Send a command and receive response
    pub async fn send_command(&self, cmd: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        // Send command
        writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
        writer.flush().await?;

        // Read response
        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}
