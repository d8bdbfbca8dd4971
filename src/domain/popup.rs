//! Popup visibility and in-popup view state

use crate::domain::clipboard::ContentFilter;

/// Per-visibility-session view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupSession {
    pub selected: usize,
    pub query: String,
    pub filter: ContentFilter,
}

impl PopupSession {
    fn new(filter: ContentFilter) -> Self {
        Self {
            selected: 0,
            query: String::new(),
            filter,
        }
    }
}

/// Popup state machine: hidden, or visible with selection/search state.
///
/// Showing resets the selection and search query; the active filter is
/// carried over from the previous session.
#[derive(Debug, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible(PopupSession),
}

impl PopupState {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    pub fn session(&self) -> Option<&PopupSession> {
        match self {
            Self::Visible(session) => Some(session),
            Self::Hidden => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut PopupSession> {
        match self {
            Self::Visible(session) => Some(session),
            Self::Hidden => None,
        }
    }

    /// Transition to visible with a fresh session; no-op when already
    /// visible.
    pub fn show(&mut self, filter: ContentFilter) {
        if !self.is_visible() {
            *self = Self::Visible(PopupSession::new(filter));
        }
    }

    /// Transition to hidden; no-op when already hidden
    pub fn hide(&mut self) {
        *self = Self::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let state = PopupState::default();
        assert!(!state.is_visible());
        assert!(state.session().is_none());
    }

    #[test]
    fn show_resets_selection_and_query() {
        let mut state = PopupState::default();
        state.show(ContentFilter::All);
        let session = state.session().unwrap();
        assert_eq!(session.selected, 0);
        assert!(session.query.is_empty());
    }

    #[test]
    fn show_carries_the_given_filter() {
        let mut state = PopupState::default();
        state.show(ContentFilter::Images);
        assert_eq!(state.session().unwrap().filter, ContentFilter::Images);
    }

    #[test]
    fn show_while_visible_keeps_session() {
        let mut state = PopupState::default();
        state.show(ContentFilter::All);
        state.session_mut().unwrap().selected = 3;
        state.show(ContentFilter::All);
        assert_eq!(state.session().unwrap().selected, 3);
    }

    #[test]
    fn hide_clears_session() {
        let mut state = PopupState::default();
        state.show(ContentFilter::All);
        state.hide();
        assert!(!state.is_visible());
    }
}
