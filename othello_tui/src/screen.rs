//! Screen trait and transition type for the page state machine.

use crossterm::event::{KeyEvent, MouseEvent};
use othello_client::OpponentKind;
use ratatui::{Frame, layout::Rect};

/// The result of handling an event on a screen.
///
/// Screens return this from the handler methods to drive the
/// [`AppController`](crate::controller::AppController) state machine.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the home screen.
    GoToHome,
    /// Start a fresh match against the given opponent kind.
    GoToGame {
        /// Opponent selected by the navigation action.
        opponent: OpponentKind,
    },
    /// Reopen an existing match by fetching it from the service.
    GoToResume {
        /// Identifier of the match to fetch.
        match_id: String,
    },
    /// Navigate to the match history screen.
    GoToHistory,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the page state machine.
///
/// Each screen owns its own state, renders its UI, and handles input.
/// The controller calls these methods in the event loop; `tick` runs once
/// per loop iteration so screens can drain completions of background
/// service calls before the next draw.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Absorbs any pending background-call completions.
    fn tick(&mut self) -> ScreenTransition {
        ScreenTransition::Stay
    }

    /// Handles a key press and returns the resulting transition.
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;

    /// Handles a mouse event. `area` is the full terminal area the last
    /// frame was drawn into.
    fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> ScreenTransition {
        let _ = (mouse, area);
        ScreenTransition::Stay
    }
}
