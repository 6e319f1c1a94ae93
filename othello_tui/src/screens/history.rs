//! History screen: read-only list of past and active matches.
//!
//! One `list_history` call is issued when the screen is constructed; the
//! three display states (loading, errored, loaded) are mutually exclusive
//! and a failure never shows a partial list. Reload happens only by
//! leaving and re-entering the screen.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use othello_client::{ApiError, HistoryItem, MatchService};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use tokio::sync::mpsc;
use tracing::info;

use crate::screen::{Screen, ScreenTransition};

/// Outcome of the single history fetch.
#[derive(Debug)]
enum HistoryLoad {
    /// The request is still in flight.
    Loading,
    /// The request failed; only the message is shown.
    Failed(String),
    /// The listing arrived, in server order.
    Loaded(Vec<HistoryItem>),
}

/// State for the history screen.
pub struct HistoryScreen {
    load: HistoryLoad,
    rx: mpsc::UnboundedReceiver<Result<Vec<HistoryItem>, ApiError>>,
    table_state: TableState,
}

impl HistoryScreen {
    /// Creates the screen and issues the one history fetch.
    pub fn new(service: Arc<dyn MatchService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!("Requesting match history");
        tokio::spawn(async move {
            let _ = tx.send(service.list_history().await);
        });
        Self {
            load: HistoryLoad::Loading,
            rx,
            table_state: TableState::default(),
        }
    }

    /// Applies the fetch result. Rows keep the exact order received; the
    /// client never re-sorts.
    fn apply(&mut self, result: Result<Vec<HistoryItem>, ApiError>) {
        match result {
            Ok(items) => {
                info!(count = items.len(), "History loaded");
                if !items.is_empty() {
                    self.table_state.select(Some(0));
                }
                self.load = HistoryLoad::Loaded(items);
            }
            Err(err) => {
                info!(error = %err, "History fetch failed");
                self.load = HistoryLoad::Failed(err.to_string());
            }
        }
    }

    fn items(&self) -> &[HistoryItem] {
        match &self.load {
            HistoryLoad::Loaded(items) => items,
            _ => &[],
        }
    }

    fn select_previous(&mut self) {
        let count = self.items().len();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.table_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = self.items().len();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn selected_match_id(&self) -> Option<String> {
        let items = self.items();
        let idx = self.table_state.selected()?;
        items.get(idx).map(|item| item.id.clone())
    }
}

impl Screen for HistoryScreen {
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Match History")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        match &self.load {
            HistoryLoad::Loading => {
                let loading = Paragraph::new("Loading history...")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(loading, chunks[1]);
            }
            HistoryLoad::Failed(message) => {
                let error = Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Error"));
                frame.render_widget(error, chunks[1]);
            }
            HistoryLoad::Loaded(items) if items.is_empty() => {
                let empty = Paragraph::new("No matches yet. Start a game from the home screen.")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(empty, chunks[1]);
            }
            HistoryLoad::Loaded(items) => {
                let header = Row::new(vec![
                    Cell::from("Opponent").style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("Started").style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("Result").style(Style::default().add_modifier(Modifier::BOLD)),
                ])
                .style(Style::default().fg(Color::Yellow));

                let rows: Vec<Row> = items
                    .iter()
                    .map(|item| {
                        let result_color = match item.winner {
                            None => Color::DarkGray,
                            Some(_) => Color::White,
                        };
                        Row::new(vec![
                            Cell::from(item.opponent.label()),
                            Cell::from(item.created_at.format("%Y-%m-%d %H:%M").to_string()),
                            Cell::from(item.result_label())
                                .style(Style::default().fg(result_color)),
                        ])
                    })
                    .collect();

                let widths = [
                    Constraint::Percentage(30),
                    Constraint::Percentage(30),
                    Constraint::Percentage(40),
                ];

                let table = Table::new(rows, widths)
                    .header(header)
                    .block(Block::default().borders(Borders::ALL).title("Matches"))
                    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

                let mut table_state = self.table_state.clone();
                frame.render_stateful_widget(table, chunks[1], &mut table_state);
            }
        }

        let help = Paragraph::new("↑↓: Navigate | Enter: Open Match | Esc: Home | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    fn tick(&mut self) -> ScreenTransition {
        while let Ok(result) = self.rx.try_recv() {
            self.apply(result);
        }
        ScreenTransition::Stay
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
            KeyCode::Enter => match self.selected_match_id() {
                Some(match_id) => {
                    info!(match_id = %match_id, "Reopening match from history");
                    ScreenTransition::GoToResume { match_id }
                }
                None => ScreenTransition::Stay,
            },
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => ScreenTransition::GoToHome,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
