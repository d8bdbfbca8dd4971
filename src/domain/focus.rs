//! Foreign-application identity and previous-focus tracking

use std::collections::HashSet;

/// Identity of a running application as seen by the workspace.
///
/// `pid` is absent when the handle was supplied by an external trigger
/// that only knows the app's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppHandle {
    pub pid: Option<i32>,
    /// Bundle identifier where available
    pub identifier: Option<String>,
    /// Display name
    pub name: Option<String>,
}

impl AppHandle {
    pub fn with_pid(pid: i32) -> Self {
        Self {
            pid: Some(pid),
            identifier: None,
            name: None,
        }
    }

    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            pid: None,
            identifier: Some(identifier.into()),
            name: None,
        }
    }

    /// Best label for status output
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.identifier.clone())
            .unwrap_or_else(|| match self.pid {
                Some(pid) => format!("pid {}", pid),
                None => "unknown".to_string(),
            })
    }
}

/// Apps whose clipboard changes are never captured.
///
/// Matched against bundle identifier or display name; enforced by the
/// monitor before content ever becomes a history item.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    identifiers: HashSet<String>,
}

impl ExclusionSet {
    pub fn new(identifiers: impl IntoIterator<Item = String>) -> Self {
        Self {
            identifiers: identifiers.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn contains(&self, app: &AppHandle) -> bool {
        let by_identifier = app
            .identifier
            .as_ref()
            .is_some_and(|id| self.identifiers.contains(id));
        let by_name = app
            .name
            .as_ref()
            .is_some_and(|name| self.identifiers.contains(name));
        by_identifier || by_name
    }
}

/// Records the most recently active foreign application.
///
/// Activations of our own process are ignored so that opening the
/// popup or settings never overwrites the restoration target.
#[derive(Debug)]
pub struct FocusTracker {
    own_pid: i32,
    previous: Option<AppHandle>,
}

impl FocusTracker {
    pub fn new(own_pid: i32) -> Self {
        Self {
            own_pid,
            previous: None,
        }
    }

    /// Record an activation, unless the activated app is ourselves
    pub fn note_activation(&mut self, app: AppHandle) {
        if app.pid == Some(self.own_pid) {
            return;
        }
        self.previous = Some(app);
    }

    /// Force-set the previous app from an external trigger that knows
    /// the true focus target (bypasses activation-event timing races).
    pub fn hand_off(&mut self, app: AppHandle) {
        self.previous = Some(app);
    }

    /// Current previous-app value, if any
    pub fn snapshot(&self) -> Option<&AppHandle> {
        self.previous.as_ref()
    }
}
