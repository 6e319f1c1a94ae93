//! Page controller: the state machine driving the multi-screen client.

use std::sync::Arc;

use crossterm::event::{self, Event, KeyEventKind};
use othello_client::MatchService;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::screen::{Screen, ScreenTransition};
use crate::screens::{GameScreen, HistoryScreen, HomeScreen};

/// Active page in the navigation state machine.
enum ActiveScreen {
    Home(HomeScreen),
    Game(GameScreen),
    History(HistoryScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::Home(s) => s,
            ActiveScreen::Game(s) => s,
            ActiveScreen::History(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::Home(s) => s,
            ActiveScreen::Game(s) => s,
            ActiveScreen::History(s) => s,
        }
    }
}

/// Controller that owns the shared service handle and the active screen.
///
/// Call [`AppController::run`] to start the event loop.
pub struct AppController {
    service: Arc<dyn MatchService>,
}

impl AppController {
    /// Creates a controller for the given service.
    pub fn new(service: Arc<dyn MatchService>) -> Self {
        Self { service }
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        info!("Starting page event loop");

        let mut screen = ActiveScreen::Home(HomeScreen::new());

        loop {
            // Absorb completed background calls before drawing so the frame
            // reflects the newest state.
            let transition = screen.as_screen_mut().tick();
            if let Some(next) = self.apply_transition(transition, screen) {
                screen = next;
            } else {
                return Ok(());
            }

            terminal.draw(|f| screen.as_screen().render(f))?;

            // Poll for input with a short timeout to keep the loop
            // responsive while calls are in flight.
            if event::poll(Duration::from_millis(100))? {
                let transition = match event::read()? {
                    Event::Key(key) => {
                        // Skip key release events (crossterm fires both
                        // press and release on some terminals).
                        if key.kind == KeyEventKind::Release {
                            ScreenTransition::Stay
                        } else {
                            screen.as_screen_mut().handle_key(key)
                        }
                    }
                    Event::Mouse(mouse) => {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        screen.as_screen_mut().handle_mouse(mouse, area)
                    }
                    _ => ScreenTransition::Stay,
                };

                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("Client quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to
    /// quit.
    fn apply_transition(
        &self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToHome => {
                info!("Navigating to Home");
                Some(ActiveScreen::Home(HomeScreen::new()))
            }

            ScreenTransition::GoToGame { opponent } => {
                info!(opponent = %opponent, "Navigating to Game");
                Some(ActiveScreen::Game(GameScreen::new(
                    Arc::clone(&self.service),
                    opponent,
                )))
            }

            ScreenTransition::GoToResume { match_id } => {
                info!(match_id = %match_id, "Navigating to Game (resume)");
                Some(ActiveScreen::Game(GameScreen::resume(
                    Arc::clone(&self.service),
                    match_id,
                )))
            }

            ScreenTransition::GoToHistory => {
                info!("Navigating to History");
                Some(ActiveScreen::History(HistoryScreen::new(Arc::clone(
                    &self.service,
                ))))
            }

            ScreenTransition::Quit => {
                debug!("Quit transition");
                None
            }
        }
    }
}
