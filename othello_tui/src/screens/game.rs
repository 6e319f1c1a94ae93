//! Game screen: one active match against the remote service.
//!
//! The screen owns a [`MatchSession`] and drives it with user intent and
//! the completions of spawned service calls. Calls run on background tokio
//! tasks and report back over an unbounded channel; `tick` drains that
//! channel before every draw. Responses from a superseded request are
//! discarded by the session's sequence guard, so navigating or restarting
//! while a call is in flight is always safe.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use othello_client::{
    Coord, MatchService, MatchSession, MatchState, OpponentKind, SessionEvent, SessionPhase,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::board;
use crate::screen::{Screen, ScreenTransition};

/// State for the game screen.
pub struct GameScreen {
    service: Arc<dyn MatchService>,
    session: MatchSession,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    cursor: Coord,
}

impl GameScreen {
    /// Opens the screen and immediately starts a fresh match against the
    /// given opponent kind.
    pub fn new(service: Arc<dyn MatchService>, opponent: OpponentKind) -> Self {
        let mut screen = Self::prepare(service, opponent);
        let seq = screen.session.start();
        screen.spawn_create(seq);
        screen
    }

    /// Opens the screen on an existing match, fetching it by id.
    pub fn resume(service: Arc<dyn MatchService>, match_id: String) -> Self {
        let mut screen = Self::prepare(service, OpponentKind::default());
        let seq = screen.session.start();
        screen.spawn_fetch(seq, match_id);
        screen
    }

    fn prepare(service: Arc<dyn MatchService>, opponent: OpponentKind) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            session: MatchSession::new(opponent),
            events_tx,
            events_rx,
            // Default the cursor next to the opening legal moves.
            cursor: Coord { row: 2, col: 3 },
        }
    }

    fn spawn_create(&self, seq: u64) {
        let service = Arc::clone(&self.service);
        let opponent = *self.session.opponent();
        let tx = self.events_tx.clone();
        info!(seq, opponent = %opponent, "Requesting match creation");
        tokio::spawn(async move {
            let result = service.create_match(opponent).await;
            let _ = tx.send(SessionEvent::Created { seq, result });
        });
    }

    fn spawn_fetch(&self, seq: u64, match_id: String) {
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        info!(seq, match_id = %match_id, "Requesting match fetch");
        tokio::spawn(async move {
            let result = service.get_match(&match_id).await;
            let _ = tx.send(SessionEvent::Fetched { seq, result });
        });
    }

    fn spawn_move(&self, seq: u64, match_id: String, coord: Coord) {
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        info!(seq, match_id = %match_id, row = coord.row, col = coord.col, "Submitting move");
        tokio::spawn(async move {
            let result = service.post_move(&match_id, coord).await;
            let _ = tx.send(SessionEvent::Moved { seq, result });
        });
    }

    /// Handles a cell activation from the board. A no-op unless the cell is
    /// empty, listed as legal, and the session accepts a submission now.
    fn activate(&mut self, coord: Coord) {
        let Some(state) = self.session.state().as_ref() else {
            return;
        };
        if !board::is_playable(&state.board, &state.legal_moves, coord) {
            debug!(row = coord.row, col = coord.col, "Activation on unplayable cell ignored");
            return;
        }
        let match_id = state.id.clone();
        if let Some(seq) = self.session.begin_submit(coord) {
            self.spawn_move(seq, match_id, coord);
        }
    }

    fn start_new_game(&mut self) {
        let opponent = *self.session.opponent();
        if let Some(seq) = self.session.new_game(opponent) {
            self.spawn_create(seq);
        }
    }

    fn move_cursor(&mut self, drow: i16, dcol: i16) {
        let row = (i16::from(self.cursor.row) + drow).clamp(0, 7) as u8;
        let col = (i16::from(self.cursor.col) + dcol).clamp(0, 7) as u8;
        self.cursor = Coord { row, col };
    }

    fn status_line(&self) -> String {
        match self.session.phase() {
            SessionPhase::Uninitialized | SessionPhase::Starting => "Starting match...".to_string(),
            SessionPhase::SubmittingMove => "Submitting move...".to_string(),
            SessionPhase::Active | SessionPhase::Errored => match self.session.state() {
                Some(state) => live_status(state),
                None => String::new(),
            },
            SessionPhase::Over => self
                .session
                .state()
                .as_ref()
                .and_then(MatchState::outcome_summary)
                .unwrap_or_else(|| "Game over".to_string()),
        }
    }

    /// Fixed page layout: title, status, board, error line, help. Shared by
    /// render and mouse handling so hit-testing sees the drawn geometry.
    fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(board::CELL_HEIGHT * 8),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    }
}

impl Screen for GameScreen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Self::layout(frame.area());

        let title = format!("Othello vs {}", self.session.opponent().label());
        let header = Paragraph::new(title)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let status = Paragraph::new(self.status_line())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(status, chunks[1]);

        match self.session.state() {
            Some(state) => {
                let cursor = (!state.over).then_some(self.cursor);
                board::render(frame, chunks[2], &state.board, &state.legal_moves, cursor);
                if state.over {
                    render_game_over(frame, chunks[2], state);
                }
            }
            None => {
                let text = match self.session.phase() {
                    SessionPhase::Errored => "The match could not be started.",
                    _ => "Contacting the match service...",
                };
                let placeholder = Paragraph::new(text)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center);
                frame.render_widget(placeholder, chunks[2]);
            }
        }

        if let Some(message) = self.session.last_error() {
            let banner = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            frame.render_widget(banner, chunks[3]);
        }

        let help = Paragraph::new(
            "↑↓←→: Cursor | Enter/Click: Place | n: New Game | h: History | Esc: Home | q: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    fn tick(&mut self) -> ScreenTransition {
        while let Ok(event) = self.events_rx.try_recv() {
            self.session.handle(event);
        }
        ScreenTransition::Stay
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.move_cursor(-1, 0);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.move_cursor(1, 0);
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.move_cursor(0, -1);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.move_cursor(0, 1);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate(self.cursor);
                ScreenTransition::Stay
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.start_new_game();
                ScreenTransition::Stay
            }
            KeyCode::Char('h') | KeyCode::Char('H') => ScreenTransition::GoToHistory,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => ScreenTransition::GoToHome,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> ScreenTransition {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let chunks = Self::layout(area);
            if let Some(coord) = board::hit_test(chunks[2], mouse.column, mouse.row) {
                self.cursor = coord;
                self.activate(coord);
            }
        }
        ScreenTransition::Stay
    }
}

fn live_status(state: &MatchState) -> String {
    let (black, white) = state.score_pair();
    format!(
        "{} to move   Black {black} : {white} White",
        state.player.label()
    )
}

fn render_game_over(frame: &mut Frame, area: Rect, state: &MatchState) {
    let summary = state
        .outcome_summary()
        .unwrap_or_else(|| "Game over".to_string());
    let lines = vec![
        Line::from("Game over"),
        Line::from(summary),
        Line::from("n: New Game | h: History"),
    ];
    let height = lines.len() as u16 + 2;
    let width = 36;
    let popup = centered(area, width, height);
    frame.render_widget(Clear, popup);
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Result"));
    frame.render_widget(panel, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
