//! Hotkey rebind-capture state machine

use std::fmt;
use thiserror::Error;

use super::binding::{is_modifier_key_code, HotkeyBinding};

/// Capture machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
}

impl CaptureState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidCaptureTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Result of feeding a key event to an open capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The event produced a new binding; the caller must re-register
    /// the live hotkey with it.
    Accepted(HotkeyBinding),
    /// The event did not qualify; capture stays open.
    Ignored,
}

/// Rebind-capture state machine.
///
/// While capturing, the live global hotkey is unregistered; exactly one
/// of accept or cancel terminates the session and hands the caller the
/// binding to re-register.
///
/// State machine:
///   IDLE -> CAPTURING (begin_capture)
///   CAPTURING -> IDLE (observe_key_event accepted, new binding)
///   CAPTURING -> IDLE (cancel_capture, suspended binding restored)
#[derive(Debug)]
pub struct HotkeyCaptureMachine {
    state: State,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle { binding: HotkeyBinding },
    Capturing { suspended: HotkeyBinding },
}

impl HotkeyCaptureMachine {
    pub fn new(binding: HotkeyBinding) -> Self {
        Self {
            state: State::Idle { binding },
        }
    }

    pub fn state(&self) -> CaptureState {
        match self.state {
            State::Idle { .. } => CaptureState::Idle,
            State::Capturing { .. } => CaptureState::Capturing,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.state() == CaptureState::Capturing
    }

    /// The binding that is (or will be, once capture ends) live
    pub fn binding(&self) -> HotkeyBinding {
        match &self.state {
            State::Idle { binding } => *binding,
            State::Capturing { suspended } => *suspended,
        }
    }

    /// Enter capture mode; the caller must unregister the live hotkey
    /// when this succeeds.
    pub fn begin_capture(&mut self) -> Result<(), InvalidCaptureTransition> {
        let State::Idle { binding } = self.state else {
            return Err(InvalidCaptureTransition {
                current_state: self.state(),
                action: "begin capture".to_string(),
            });
        };
        self.state = State::Capturing { suspended: binding };
        Ok(())
    }

    /// Feed a key event to an open capture session.
    ///
    /// Accept-policy: at least one of command/option/control/shift and
    /// a key code that is not itself a modifier. Non-qualifying events
    /// are ignored and capture remains open.
    pub fn observe_key_event(
        &mut self,
        key_code: u32,
        modifier_mask: u32,
    ) -> Result<CaptureOutcome, InvalidCaptureTransition> {
        let State::Capturing { .. } = self.state else {
            return Err(InvalidCaptureTransition {
                current_state: self.state(),
                action: "observe key event".to_string(),
            });
        };

        let candidate = HotkeyBinding::new(key_code, modifier_mask);
        if !candidate.has_required_modifier() || is_modifier_key_code(key_code) {
            return Ok(CaptureOutcome::Ignored);
        }

        self.state = State::Idle { binding: candidate };
        Ok(CaptureOutcome::Accepted(candidate))
    }

    /// Abandon capture, restoring the suspended binding.
    ///
    /// Returns the binding the caller must re-register.
    pub fn cancel_capture(&mut self) -> Result<HotkeyBinding, InvalidCaptureTransition> {
        let State::Capturing { suspended } = self.state else {
            return Err(InvalidCaptureTransition {
                current_state: self.state(),
                action: "cancel capture".to_string(),
            });
        };
        self.state = State::Idle { binding: suspended };
        Ok(suspended)
    }

    /// Replace the binding outside of capture (settings rebind path)
    pub fn set_binding(&mut self, binding: HotkeyBinding) -> Result<(), InvalidCaptureTransition> {
        let State::Idle { .. } = self.state else {
            return Err(InvalidCaptureTransition {
                current_state: self.state(),
                action: "set binding".to_string(),
            });
        };
        self.state = State::Idle { binding };
        Ok(())
    }
}
