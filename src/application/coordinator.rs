//! Popup coordination use case
//!
//! The central state machine: owns history, focus tracking, popup
//! view state and the hotkey capture machine, and sequences the
//! hide / restore-focus / paste chain. All entry points run on the
//! agent loop, one event at a time; deferred steps re-enter through
//! the event queue rather than blocking.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::clipboard::{ClipboardContent, ClipboardItem, ContentFilter, HistoryStore};
use crate::domain::config::AppConfig;
use crate::domain::focus::{AppHandle, ExclusionSet, FocusTracker};
use crate::domain::hotkey::{
    CaptureOutcome, CaptureState, HotkeyBinding, HotkeyCaptureMachine, InvalidCaptureTransition,
};
use crate::domain::popup::{PopupSession, PopupState};

use super::events::EngineEvent;
use super::monitor::ClipboardMonitor;
use super::ports::{HotkeyRegistry, Pasteboard, PasteKeystroke, Workspace};

/// Resolved engine settings (read-only while running)
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub history_depth: usize,
    pub move_selected_pastes_to_top: bool,
    pub always_paste_plain_text: bool,
    /// Second focus-restoration attempt, after the immediate one
    pub restore_retry_delay: Duration,
    /// Third, last-resort attempt (only if we are still frontmost)
    pub restore_final_delay: Duration,
    /// Wait for the reactivated app to accept key events
    pub paste_settle_delay: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_depth: 10,
            move_selected_pastes_to_top: true,
            always_paste_plain_text: false,
            restore_retry_delay: Duration::from_millis(50),
            restore_final_delay: Duration::from_millis(200),
            paste_settle_delay: Duration::from_millis(500),
        }
    }
}

impl EngineSettings {
    /// Resolve settings from a merged config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            history_depth: config.history_depth_or_default(),
            move_selected_pastes_to_top: config.move_to_top_or_default(),
            always_paste_plain_text: config.plain_text_or_default(),
            ..Default::default()
        }
    }
}

/// State snapshot for status output and external renderers
#[derive(Debug, Clone)]
pub struct EngineStatus {
    pub popup_visible: bool,
    pub selected: usize,
    pub query: String,
    pub filter: ContentFilter,
    pub history_len: usize,
    pub permission_granted: bool,
    pub hotkey_registered: bool,
    pub capture_state: CaptureState,
    pub binding: HotkeyBinding,
    pub previous_app: Option<String>,
}

/// One row of the filtered view, for list rendering over the socket
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub index: usize,
    pub id: String,
    pub kind: &'static str,
    pub preview: String,
    pub captured_at: String,
}

impl ItemView {
    fn from_item(index: usize, item: &ClipboardItem) -> Self {
        Self {
            index,
            id: item.id.to_string(),
            kind: item.content.kind(),
            preview: item.content.preview_text(),
            captured_at: item.captured_at.to_rfc3339(),
        }
    }
}

/// Popup coordination use case.
///
/// Generic over the ports it drives; the agent loop feeds it events
/// and the mocks in tests stand in for the OS.
pub struct PopupCoordinator<P, W, K, H>
where
    P: Pasteboard,
    W: Workspace,
    K: PasteKeystroke,
    H: HotkeyRegistry,
{
    pasteboard: P,
    workspace: W,
    keystroke: K,
    hotkeys: H,
    settings: EngineSettings,
    history: HistoryStore,
    focus: FocusTracker,
    monitor: ClipboardMonitor,
    capture: HotkeyCaptureMachine,
    popup: PopupState,
    sticky_filter: ContentFilter,
    events: UnboundedSender<EngineEvent>,
    own_pid: i32,
    permission_granted: bool,
    hotkey_registered: bool,
    is_pasting: bool,
    /// Bumped on every visibility transition; deferred restore and
    /// paste steps carry the epoch they were scheduled under and are
    /// dropped when it is stale.
    epoch: u64,
}

impl<P, W, K, H> PopupCoordinator<P, W, K, H>
where
    P: Pasteboard,
    W: Workspace,
    K: PasteKeystroke,
    H: HotkeyRegistry,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pasteboard: P,
        workspace: W,
        keystroke: K,
        hotkeys: H,
        settings: EngineSettings,
        exclusions: ExclusionSet,
        binding: HotkeyBinding,
        own_pid: i32,
        events: UnboundedSender<EngineEvent>,
    ) -> Self {
        let history = HistoryStore::new(settings.history_depth);
        Self {
            pasteboard,
            workspace,
            keystroke,
            hotkeys,
            settings,
            history,
            focus: FocusTracker::new(own_pid),
            monitor: ClipboardMonitor::new(exclusions),
            capture: HotkeyCaptureMachine::new(binding),
            popup: PopupState::default(),
            sticky_filter: ContentFilter::All,
            events,
            own_pid,
            permission_granted: false,
            hotkey_registered: false,
            is_pasting: false,
            epoch: 0,
        }
    }

    /// Seed startup state: remember the current frontmost app and
    /// adopt the pasteboard's pre-existing contents as already-seen.
    pub async fn start(&mut self) {
        if let Some(front) = self.workspace.frontmost().await {
            self.focus.note_activation(front);
        }
        self.monitor.resync(&self.pasteboard).await;
    }

    /// Release the live hotkey on shutdown
    pub async fn stop(&mut self) {
        self.hotkeys.unregister().await;
        self.hotkey_registered = false;
    }

    // --- accessors ---------------------------------------------------

    pub fn is_popup_visible(&self) -> bool {
        self.popup.is_visible()
    }

    pub fn is_accessibility_granted(&self) -> bool {
        self.permission_granted
    }

    /// Auto-paste needs the accessibility grant for synthetic keys
    pub fn can_auto_paste(&self) -> bool {
        self.permission_granted
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn popup_session(&self) -> Option<&PopupSession> {
        self.popup.session()
    }

    pub fn previous_app(&self) -> Option<&AppHandle> {
        self.focus.snapshot()
    }

    pub fn status(&self) -> EngineStatus {
        let (selected, query, filter) = match self.popup.session() {
            Some(session) => (session.selected, session.query.clone(), session.filter),
            None => (0, String::new(), self.sticky_filter),
        };
        EngineStatus {
            popup_visible: self.popup.is_visible(),
            selected,
            query,
            filter,
            history_len: self.history.len(),
            permission_granted: self.permission_granted,
            hotkey_registered: self.hotkey_registered,
            capture_state: self.capture.state(),
            binding: self.capture.binding(),
            previous_app: self.focus.snapshot().map(AppHandle::label),
        }
    }

    /// The filtered+searched view the popup renders: the visible
    /// session's filter and query, or the full history when hidden.
    pub fn filtered_items(&self) -> Vec<&ClipboardItem> {
        match self.popup.session() {
            Some(session) => self.history.query(session.filter, &session.query),
            None => self.history.query(ContentFilter::All, ""),
        }
    }

    /// Serializable rows of the current filtered view
    pub fn list_view(&self) -> Vec<ItemView> {
        self.filtered_items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| ItemView::from_item(index, item))
            .collect()
    }

    // --- clipboard intake --------------------------------------------

    /// One poll cycle: track the frontmost app, then capture any new
    /// classified, non-excluded content into history. Returns whether
    /// an item was inserted.
    pub async fn clipboard_tick(&mut self) -> bool {
        let front = self.workspace.frontmost().await;
        if let Some(app) = front.clone() {
            self.focus.note_activation(app);
        }
        match self.monitor.poll(&self.pasteboard, front.as_ref()).await {
            Some(content) => self.history.insert(content),
            None => false,
        }
    }

    // --- permission / hotkey arming ----------------------------------

    /// Owner-polled permission update. Registers the live hotkey the
    /// first time the grant is observed; returns the registration
    /// result when one was attempted.
    pub async fn permission_tick(&mut self, granted: bool) -> Option<bool> {
        self.permission_granted = granted;
        if granted && !self.hotkey_registered && !self.capture.is_capturing() {
            let ok = self.hotkeys.register(&self.capture.binding()).await;
            self.hotkey_registered = ok;
            return Some(ok);
        }
        None
    }

    // --- popup lifecycle ---------------------------------------------

    /// Live hotkey pressed: remember the frontmost app, then toggle.
    pub async fn hotkey_pressed(&mut self) {
        if self.capture.is_capturing() {
            // The live hotkey is unregistered during capture; a stray
            // press that raced the unregister is ignored.
            return;
        }
        if let Some(front) = self.workspace.frontmost().await {
            self.focus.note_activation(front);
        }
        self.toggle_popup().await;
    }

    pub async fn toggle_popup(&mut self) {
        if self.popup.is_visible() {
            self.hide_popup(false).await;
        } else {
            self.popup.show(self.sticky_filter);
            self.epoch += 1;
        }
    }

    /// Open from an external trigger (e.g. a Services-menu style
    /// invocation) that may supply the true previous app directly.
    pub async fn open_from_external(&mut self, handoff: Option<AppHandle>) {
        if let Some(app) = handoff {
            self.focus.hand_off(app);
        }
        if !self.popup.is_visible() {
            self.popup.show(self.sticky_filter);
            self.epoch += 1;
        }
    }

    /// Dismiss without selecting
    pub async fn escape(&mut self) {
        self.hide_popup(false).await;
    }

    /// Select the item at `index` of the currently filtered+searched
    /// view, write it to the pasteboard, and hide. Out-of-range
    /// indices and hidden state are no-ops.
    pub async fn select_item(&mut self, index: usize) {
        let Some(session) = self.popup.session() else {
            return;
        };
        let (filter, query) = (session.filter, session.query.clone());

        let (id, content) = {
            let view = self.history.query(filter, &query);
            match view.get(index) {
                Some(item) => (item.id, item.content.clone()),
                None => return,
            }
        };

        let payload = if self.settings.always_paste_plain_text {
            match &content {
                ClipboardContent::RichText { plain, .. } => ClipboardContent::Text(plain.clone()),
                other => other.clone(),
            }
        } else {
            content
        };

        let wrote = self.pasteboard.write(&payload).await.is_ok();
        // Our own write must not be re-captured next poll
        self.monitor.resync(&self.pasteboard).await;

        if self.settings.move_selected_pastes_to_top {
            self.history.move_to_top(id);
        }

        let paste = wrote && self.can_auto_paste();
        self.hide_popup(paste).await;
    }

    // --- in-popup view mutations -------------------------------------

    pub fn set_search(&mut self, query: String) {
        let Some(session) = self.popup.session_mut() else {
            return;
        };
        session.query = query;
        session.selected = 0;
    }

    pub fn set_filter(&mut self, filter: ContentFilter) {
        self.sticky_filter = filter;
        if let Some(session) = self.popup.session_mut() {
            session.filter = filter;
            session.selected = 0;
        }
    }

    /// Remove by raw history index (not the filtered view)
    pub fn remove_item(&mut self, index: usize) -> bool {
        let removed = self.history.remove(index);
        if removed {
            self.clamp_selection();
        }
        removed
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        if let Some(session) = self.popup.session_mut() {
            session.selected = 0;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_items().len();
        if let Some(session) = self.popup.session_mut() {
            if len == 0 {
                session.selected = 0;
            } else if session.selected >= len {
                session.selected = len - 1;
            }
        }
    }

    // --- hotkey rebind capture ---------------------------------------

    /// Enter rebind capture: the live hotkey is unregistered for the
    /// whole session so it cannot fire while the user tries chords.
    pub async fn begin_capture(&mut self) -> Result<(), InvalidCaptureTransition> {
        self.capture.begin_capture()?;
        self.hotkeys.unregister().await;
        self.hotkey_registered = false;
        Ok(())
    }

    /// Feed a capture key event; on acceptance the new binding goes
    /// live immediately and is returned inside the outcome so the
    /// owner can persist it.
    pub async fn observe_capture_key(
        &mut self,
        key_code: u32,
        modifier_mask: u32,
    ) -> Result<CaptureOutcome, InvalidCaptureTransition> {
        let outcome = self.capture.observe_key_event(key_code, modifier_mask)?;
        if let CaptureOutcome::Accepted(binding) = outcome {
            if self.permission_granted {
                self.hotkey_registered = self.hotkeys.register(&binding).await;
            }
        }
        Ok(outcome)
    }

    /// Abandon capture and put the suspended binding back on the air
    pub async fn cancel_capture(&mut self) -> Result<(), InvalidCaptureTransition> {
        let binding = self.capture.cancel_capture()?;
        if self.permission_granted {
            self.hotkey_registered = self.hotkeys.register(&binding).await;
        }
        Ok(())
    }

    /// Settings-driven rebind outside of capture
    pub async fn update_hotkey(
        &mut self,
        binding: HotkeyBinding,
    ) -> Result<bool, InvalidCaptureTransition> {
        self.capture.set_binding(binding)?;
        self.hotkeys.unregister().await;
        self.hotkey_registered = if self.permission_granted {
            self.hotkeys.register(&binding).await
        } else {
            false
        };
        Ok(self.hotkey_registered)
    }

    // --- hide / restore / paste sequence -----------------------------

    /// Hide and kick off the staggered focus-restoration chain.
    ///
    /// The chain is deliberately redundant: activating the previous
    /// app is not instantaneous and not reliably observable as done.
    /// With no recorded previous app the whole chain is skipped.
    async fn hide_popup(&mut self, paste: bool) {
        if !self.popup.is_visible() {
            return;
        }
        self.popup.hide();
        self.epoch += 1;
        let epoch = self.epoch;

        if self.focus.snapshot().is_none() {
            return;
        }

        self.restore_focus(epoch, 1).await;
        self.schedule(
            EngineEvent::RestoreFocus { epoch, attempt: 2 },
            self.settings.restore_retry_delay,
        );
        self.schedule(
            EngineEvent::RestoreFocus { epoch, attempt: 3 },
            self.settings.restore_final_delay,
        );

        if paste && !self.is_pasting {
            self.is_pasting = true;
            self.schedule(EngineEvent::SendPaste { epoch }, self.settings.paste_settle_delay);
        }
    }

    /// One restoration attempt. Re-reads the focus snapshot each time
    /// (the close-time value wins). Attempt 3 only fires when we are
    /// still the frontmost app, i.e. the earlier attempts lost a race.
    pub async fn restore_focus(&mut self, epoch: u64, attempt: u8) {
        if epoch != self.epoch {
            return;
        }
        let Some(app) = self.focus.snapshot().cloned() else {
            return;
        };
        if attempt >= 3 {
            let still_self = self
                .workspace
                .frontmost()
                .await
                .is_some_and(|front| front.pid == Some(self.own_pid));
            if !still_self {
                return;
            }
        }
        let _ = self.workspace.activate(&app).await;
    }

    /// Deferred paste keystroke. Exactly one may be in flight; a
    /// stale epoch clears the guard without sending.
    pub async fn send_paste(&mut self, epoch: u64) -> bool {
        self.is_pasting = false;
        if epoch != self.epoch {
            return false;
        }
        if self.focus.snapshot().is_none() {
            return false;
        }
        self.keystroke.send_paste().await.is_ok()
    }

    /// Enqueue a deferred re-entry into the agent loop. The task only
    /// holds a sender; if the loop is gone the send is a no-op.
    fn schedule(&self, event: EngineEvent, delay: Duration) {
        let tx = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
    }
}
