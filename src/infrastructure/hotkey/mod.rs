//! Global-hotkey registration adapter
//!
//! The global-hotkey manager is not thread-mobile on every platform,
//! so a dedicated thread owns it. The service handle sends it
//! register/unregister commands and the thread forwards hotkey
//! presses into the engine's event queue.

use std::sync::mpsc::{self as std_mpsc, RecvTimeoutError};
use std::time::Duration;

use async_trait::async_trait;
use global_hotkey::{
    hotkey::{Code, HotKey, Modifiers},
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::application::events::EngineEvent;
use crate::application::ports::HotkeyRegistry;
use crate::domain::hotkey::{modifiers, HotkeyBinding};

enum HotkeyCommand {
    Register(HotkeyBinding, std_mpsc::Sender<bool>),
    Unregister(std_mpsc::Sender<()>),
}

/// Handle to the hotkey-manager thread
pub struct GlobalHotkeyService {
    commands: std_mpsc::Sender<HotkeyCommand>,
}

impl GlobalHotkeyService {
    /// Spawn the manager thread; presses of the live binding are
    /// forwarded to `events`.
    pub fn spawn(events: UnboundedSender<EngineEvent>) -> Self {
        let (commands, receiver) = std_mpsc::channel();
        std::thread::spawn(move || run_manager(receiver, events));
        Self { commands }
    }
}

#[async_trait]
impl HotkeyRegistry for GlobalHotkeyService {
    async fn register(&self, binding: &HotkeyBinding) -> bool {
        let (reply_tx, reply_rx) = std_mpsc::channel();
        if self
            .commands
            .send(HotkeyCommand::Register(*binding, reply_tx))
            .is_err()
        {
            return false;
        }
        tokio::task::spawn_blocking(move || {
            reply_rx.recv_timeout(Duration::from_secs(1)).unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }

    async fn unregister(&self) {
        let (reply_tx, reply_rx) = std_mpsc::channel();
        if self.commands.send(HotkeyCommand::Unregister(reply_tx)).is_err() {
            return;
        }
        let _ = tokio::task::spawn_blocking(move || {
            reply_rx.recv_timeout(Duration::from_secs(1))
        })
        .await;
    }
}

fn run_manager(
    commands: std_mpsc::Receiver<HotkeyCommand>,
    events: UnboundedSender<EngineEvent>,
) {
    // A headless environment (no display server) yields no manager;
    // registration then reports failure instead of dying.
    let manager = GlobalHotKeyManager::new().ok();
    let mut live: Option<HotKey> = None;
    let hotkey_events = GlobalHotKeyEvent::receiver();

    loop {
        match commands.recv_timeout(Duration::from_millis(50)) {
            Ok(HotkeyCommand::Register(binding, reply)) => {
                let ok = register_binding(manager.as_ref(), &mut live, &binding);
                let _ = reply.send(ok);
            }
            Ok(HotkeyCommand::Unregister(reply)) => {
                if let (Some(manager), Some(previous)) = (manager.as_ref(), live.take()) {
                    let _ = manager.unregister(previous);
                }
                let _ = reply.send(());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        while let Ok(event) = hotkey_events.try_recv() {
            let is_live = live.as_ref().map_or(false, |hotkey| hotkey.id() == event.id);
            if is_live && event.state == HotKeyState::Pressed {
                let _ = events.send(EngineEvent::HotkeyPressed);
            }
        }
    }
}

fn register_binding(
    manager: Option<&GlobalHotKeyManager>,
    live: &mut Option<HotKey>,
    binding: &HotkeyBinding,
) -> bool {
    let Some(manager) = manager else {
        return false;
    };
    let Some(hotkey) = to_hotkey(binding) else {
        return false;
    };
    if let Some(previous) = live.take() {
        let _ = manager.unregister(previous);
    }
    if manager.register(hotkey).is_err() {
        return false;
    }
    *live = Some(hotkey);
    true
}

/// Map our binding to a global-hotkey HotKey; unknown key codes are
/// unregisterable and reported as failure.
fn to_hotkey(binding: &HotkeyBinding) -> Option<HotKey> {
    let mut mods = Modifiers::empty();
    if binding.modifiers & modifiers::COMMAND != 0 {
        mods |= Modifiers::META;
    }
    if binding.modifiers & modifiers::OPTION != 0 {
        mods |= Modifiers::ALT;
    }
    if binding.modifiers & modifiers::CONTROL != 0 {
        mods |= Modifiers::CONTROL;
    }
    if binding.modifiers & modifiers::SHIFT != 0 {
        mods |= Modifiers::SHIFT;
    }
    Some(HotKey::new(Some(mods), to_code(binding.key_code)?))
}

/// macOS virtual key code to key identity
fn to_code(key_code: u32) -> Option<Code> {
    let code = match key_code {
        0 => Code::KeyA,
        1 => Code::KeyS,
        2 => Code::KeyD,
        3 => Code::KeyF,
        4 => Code::KeyH,
        5 => Code::KeyG,
        6 => Code::KeyZ,
        7 => Code::KeyX,
        8 => Code::KeyC,
        9 => Code::KeyV,
        11 => Code::KeyB,
        12 => Code::KeyQ,
        13 => Code::KeyW,
        14 => Code::KeyE,
        15 => Code::KeyR,
        16 => Code::KeyY,
        17 => Code::KeyT,
        31 => Code::KeyO,
        32 => Code::KeyU,
        34 => Code::KeyI,
        35 => Code::KeyP,
        37 => Code::KeyL,
        38 => Code::KeyJ,
        40 => Code::KeyK,
        45 => Code::KeyN,
        46 => Code::KeyM,
        18 => Code::Digit1,
        19 => Code::Digit2,
        20 => Code::Digit3,
        21 => Code::Digit4,
        23 => Code::Digit5,
        22 => Code::Digit6,
        26 => Code::Digit7,
        28 => Code::Digit8,
        25 => Code::Digit9,
        29 => Code::Digit0,
        36 => Code::Enter,
        48 => Code::Tab,
        49 => Code::Space,
        53 => Code::Escape,
        _ => return None,
    };
    Some(code)
}
