//! Events delivered to the engine actor

use crate::domain::clipboard::ContentFilter;
use crate::domain::focus::AppHandle;

/// A single unit of work for the engine.
///
/// All producers (poll timers, the hotkey listener, the control
/// socket, deferred restore steps, signal handlers) enqueue these;
/// the agent loop drains them one at a time to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Clipboard poll cadence fired
    ClipboardTick,
    /// Accessibility permission poll cadence fired
    PermissionTick,
    /// The live global hotkey was pressed
    HotkeyPressed,
    /// Toggle popup visibility
    TogglePopup,
    /// Open the popup from an external trigger, optionally handing
    /// off the true previous app
    ShowPopup { handoff: Option<AppHandle> },
    /// Dismiss the popup without selecting
    HidePopup,
    /// Select the item at `index` of the filtered view
    SelectItem(usize),
    /// Update the popup search query
    SetSearch(String),
    /// Update the popup content filter
    SetFilter(ContentFilter),
    /// Remove the history item at a raw history index
    RemoveItem(usize),
    /// Empty the history
    ClearHistory,
    /// Enter hotkey rebind capture
    BeginCapture,
    /// A key event observed while capturing
    CaptureKey { key_code: u32, modifiers: u32 },
    /// Abandon hotkey rebind capture
    CancelCapture,
    /// Deferred focus-restoration step; stale epochs are dropped
    RestoreFocus { epoch: u64, attempt: u8 },
    /// Deferred paste keystroke; stale epochs are dropped
    SendPaste { epoch: u64 },
    /// Terminate the agent loop
    Shutdown,
}
