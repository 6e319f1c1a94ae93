//! Session controller for one active match.
//!
//! [`MatchSession`] is a synchronous state machine: the UI feeds it user
//! intent (start, activate a cell, new game) and the completions of service
//! calls as [`SessionEvent`]s, and reads back the phase, the last
//! authoritative [`MatchState`], and the last error. Keeping the machine
//! free of I/O makes every transition testable without a runtime; the
//! frontend owns the task spawning and channel plumbing.

use derive_getters::Getters;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::types::{Coord, MatchState, OpponentKind};

/// Lifecycle phase of a match session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionPhase {
    /// Created but not yet started.
    Uninitialized,
    /// A creation or fetch call is in flight; nothing to display yet.
    Starting,
    /// A live state is held and the board accepts activations.
    Active,
    /// A move submission is in flight; further input is refused.
    SubmittingMove,
    /// The held state is terminal. Only "new game" leaves this phase.
    Over,
    /// The last call failed. With a held state the board stays shown and
    /// interactive under an error banner; without one the session has
    /// nothing to display.
    Errored,
}

/// Completion of a service call, tagged with the session sequence number
/// the call was issued under.
#[derive(Debug)]
pub enum SessionEvent {
    /// `create_match` resolved.
    Created {
        /// Sequence number the creation was issued under.
        seq: u64,
        /// Parsed state or failure.
        result: Result<MatchState, ApiError>,
    },
    /// `get_match` resolved.
    Fetched {
        /// Sequence number the fetch was issued under.
        seq: u64,
        /// Parsed state or failure.
        result: Result<MatchState, ApiError>,
    },
    /// `post_move` resolved.
    Moved {
        /// Sequence number the submission was issued under.
        seq: u64,
        /// Parsed state or failure.
        result: Result<MatchState, ApiError>,
    },
}

impl SessionEvent {
    fn seq(&self) -> u64 {
        match self {
            SessionEvent::Created { seq, .. }
            | SessionEvent::Fetched { seq, .. }
            | SessionEvent::Moved { seq, .. } => *seq,
        }
    }
}

/// State machine mediating between user input, the API client, and the
/// board for one active match.
///
/// At most one creation or submission is outstanding at a time: [`start`],
/// [`new_game`], and [`begin_submit`] hand out a fresh sequence number when
/// they accept, and refuse while a call is already in flight. Completions
/// carrying a stale sequence number are dropped, so a superseded response
/// can never overwrite a newer session generation.
///
/// [`start`]: MatchSession::start
/// [`new_game`]: MatchSession::new_game
/// [`begin_submit`]: MatchSession::begin_submit
#[derive(Debug, Getters)]
pub struct MatchSession {
    /// Opponent kind for the current (or next) match.
    opponent: OpponentKind,
    /// Current lifecycle phase.
    phase: SessionPhase,
    /// Last authoritative snapshot, replaced wholesale on every success.
    state: Option<MatchState>,
    /// Message of the most recent failure, cleared on the next success.
    last_error: Option<String>,
    /// Sequence number of the most recently issued call.
    seq: u64,
}

impl MatchSession {
    /// Creates an unstarted session for the given opponent kind.
    pub fn new(opponent: OpponentKind) -> Self {
        Self {
            opponent,
            phase: SessionPhase::Uninitialized,
            state: None,
            last_error: None,
            seq: 0,
        }
    }

    /// Begins the initial creation or fetch, returning the sequence number
    /// to tag the service call with.
    pub fn start(&mut self) -> u64 {
        info!(opponent = %self.opponent, "Starting match session");
        self.restart()
    }

    /// Discards the current match and restarts with a fresh one, returning
    /// the sequence number for the creation call.
    ///
    /// Refused (returns `None`) while a creation or submission is already
    /// in flight, so repeated triggers cannot overlap requests.
    pub fn new_game(&mut self, opponent: OpponentKind) -> Option<u64> {
        if self.is_busy() {
            debug!(phase = %self.phase, "Ignoring new-game trigger while busy");
            return None;
        }
        info!(opponent = %opponent, "Discarding session and starting a new match");
        self.opponent = opponent;
        Some(self.restart())
    }

    /// Accepts a board activation, returning the sequence number for the
    /// move call, or `None` when the activation must be ignored.
    ///
    /// Accepted only while a live, non-terminal state is held (including
    /// the retained-state error variant), no submission is pending, and
    /// the target cell is empty and in the legal set.
    pub fn begin_submit(&mut self, coord: Coord) -> Option<u64> {
        let interactive = match self.phase {
            SessionPhase::Active => true,
            SessionPhase::Errored => self.state.is_some(),
            _ => false,
        };
        if !interactive {
            debug!(phase = %self.phase, "Ignoring activation outside an interactive phase");
            return None;
        }
        let state = self.state.as_ref()?;
        if state.over || !state.is_playable(coord) {
            debug!(row = coord.row, col = coord.col, "Ignoring activation on unplayable cell");
            return None;
        }
        self.phase = SessionPhase::SubmittingMove;
        self.last_error = None;
        self.seq += 1;
        debug!(seq = self.seq, row = coord.row, col = coord.col, "Move submission accepted");
        Some(self.seq)
    }

    /// Applies a service-call completion. Events from a superseded sequence
    /// are dropped.
    pub fn handle(&mut self, event: SessionEvent) {
        if event.seq() != self.seq {
            debug!(
                event_seq = event.seq(),
                current_seq = self.seq,
                "Dropping completion from a superseded request"
            );
            return;
        }
        match event {
            SessionEvent::Created { result, .. } | SessionEvent::Fetched { result, .. } => {
                match result {
                    Ok(state) => self.accept_state(state),
                    Err(err) => {
                        // Creation and fetch failures leave nothing to show.
                        info!(error = %err, "Match could not be started");
                        self.phase = SessionPhase::Errored;
                        self.last_error = Some(err.to_string());
                    }
                }
            }
            SessionEvent::Moved { result, .. } => match result {
                Ok(state) => self.accept_state(state),
                Err(err) => {
                    // The last good state stays displayed and interactive.
                    info!(error = %err, "Move rejected, keeping last known state");
                    self.phase = SessionPhase::Errored;
                    self.last_error = Some(err.to_string());
                }
            },
        }
    }

    /// True while a creation or submission is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Starting | SessionPhase::SubmittingMove
        )
    }

    /// Replaces the displayed snapshot wholesale and settles the phase.
    fn accept_state(&mut self, state: MatchState) {
        self.phase = if state.over {
            SessionPhase::Over
        } else {
            SessionPhase::Active
        };
        // A resumed match carries its own opponent kind; adopt it so the
        // next "new game" starts the same kind.
        self.opponent = state.opponent;
        debug!(id = %state.id, phase = %self.phase, "Applied authoritative state");
        self.state = Some(state);
        self.last_error = None;
    }

    fn restart(&mut self) -> u64 {
        self.phase = SessionPhase::Starting;
        self.state = None;
        self.last_error = None;
        self.seq += 1;
        self.seq
    }
}
