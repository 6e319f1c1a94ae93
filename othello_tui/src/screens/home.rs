//! Home screen: opponent selection and entry to the history page.

use crossterm::event::{KeyCode, KeyEvent};
use othello_client::OpponentKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::info;

use crate::screen::{Screen, ScreenTransition};

/// Menu options available on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeOption {
    PlayRandom,
    PlayAgent,
    PassAndPlay,
    History,
    Quit,
}

impl HomeOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayRandom => "Play vs Random AI",
            Self::PlayAgent => "Play vs Learned Agent",
            Self::PassAndPlay => "Pass-and-Play",
            Self::History => "Match History",
            Self::Quit => "Quit",
        }
    }

    fn all() -> &'static [HomeOption] {
        &[
            Self::PlayRandom,
            Self::PlayAgent,
            Self::PassAndPlay,
            Self::History,
            Self::Quit,
        ]
    }
}

/// State for the home screen.
#[derive(Debug)]
pub struct HomeScreen {
    list_state: ListState,
}

impl HomeScreen {
    /// Creates the home screen with the first option selected.
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { list_state: state }
    }

    fn select_previous(&mut self) {
        let count = HomeOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = HomeOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> HomeOption {
        let options = HomeOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for HomeScreen {
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Othello")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = HomeOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("New Game"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Home option selected");
                match option {
                    HomeOption::PlayRandom => ScreenTransition::GoToGame {
                        opponent: OpponentKind::Random,
                    },
                    HomeOption::PlayAgent => ScreenTransition::GoToGame {
                        opponent: OpponentKind::Agent,
                    },
                    HomeOption::PassAndPlay => ScreenTransition::GoToGame {
                        opponent: OpponentKind::Pvp,
                    },
                    HomeOption::History => ScreenTransition::GoToHistory,
                    HomeOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => ScreenTransition::GoToHistory,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
