/// View switcher
///
/// The front-end shows one of three pages. This module owns which one,
/// and which navigation events may move between them.
///
/// # Transitions
///
/// ```text
///            AskClicked
///   Home ─────────────────> Ask
///    │ ^ <───────────────── │
///    │ │    Back / Cancel
///    │ │
///    │ └────────────────── Question(id)
///    │        Back              ^
///    └──────────────────────────┘
///         QuestionSelected(id)
/// ```
///
/// `HomeClicked` (the header logo) returns home from any page. Every other
/// combination is rejected and the current view is kept. There is no
/// history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A page of the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum View {
    /// Question list
    #[default]
    Home,

    /// Ask-a-question form
    Ask,

    /// Question detail
    Question { question_id: Uuid },
}

/// User actions that change the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// "Ask question" button
    AskClicked,

    /// A question card was clicked
    QuestionSelected { question_id: Uuid },

    /// Back button on the ask or question page
    Back,

    /// Cancel button on the ask form
    Cancel,

    /// Header home link
    HomeClicked,
}

/// Error type for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot apply {event:?} while on {from:?}")]
pub struct NavigationError {
    pub from: View,
    pub event: NavEvent,
}

impl View {
    /// Computes the next view without changing this one
    pub fn next(self, event: NavEvent) -> Result<View, NavigationError> {
        use NavEvent::*;

        match (self, event) {
            (_, HomeClicked) => Ok(View::Home),
            (View::Home, AskClicked) => Ok(View::Ask),
            (View::Home, QuestionSelected { question_id }) => Ok(View::Question { question_id }),
            (View::Ask, Back | Cancel) => Ok(View::Home),
            (View::Question { .. }, Back) => Ok(View::Home),
            (from, event) => Err(NavigationError { from, event }),
        }
    }

    /// The question shown, if this is the detail page
    pub fn question_id(&self) -> Option<Uuid> {
        match self {
            View::Question { question_id } => Some(*question_id),
            _ => None,
        }
    }
}

/// Holds the current view
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    /// Starts on the home page
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Applies an event; on error the current view is unchanged
    pub fn dispatch(&mut self, event: NavEvent) -> Result<View, NavigationError> {
        let next = self.current.next(event)?;
        tracing::debug!(from = ?self.current, to = ?next, "navigate");
        self.current = next;
        Ok(next)
    }

    /// Returns the view to render, falling back to home when the selected
    /// question no longer exists
    pub fn resolve<F>(&mut self, exists: F) -> View
    where
        F: FnOnce(Uuid) -> bool,
    {
        if let Some(id) = self.current.question_id() {
            if !exists(id) {
                self.current = View::Home;
            }
        }
        self.current
    }
}
