//! Domain types for the match service wire contract.
//!
//! The service encodes cells and players numerically (`0` empty, `1` Black,
//! `-1` White) and board coordinates as `[row, col]` pairs. The types here
//! decode those shapes strictly: any value outside the contract is a
//! deserialization error rather than a silently-accepted state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// A single cell mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Disc {
    /// No piece.
    Empty,
    /// First player's piece.
    Black,
    /// Second player's piece.
    White,
}

impl TryFrom<i8> for Disc {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Disc::Empty),
            1 => Ok(Disc::Black),
            -1 => Ok(Disc::White),
            other => Err(format!("invalid cell value: {other}")),
        }
    }
}

impl From<Disc> for i8 {
    fn from(disc: Disc) -> Self {
        match disc {
            Disc::Empty => 0,
            Disc::Black => 1,
            Disc::White => -1,
        }
    }
}

/// The player whose turn is active. Meaningful only while a match is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Side {
    /// First player, positive sign in scores.
    Black,
    /// Second player, negative sign in scores.
    White,
}

impl Side {
    /// Human-readable name for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Side::Black => "Black",
            Side::White => "White",
        }
    }
}

impl TryFrom<i8> for Side {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::Black),
            -1 => Ok(Side::White),
            other => Err(format!("invalid player value: {other}")),
        }
    }
}

impl From<Side> for i8 {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => 1,
            Side::White => -1,
        }
    }
}

/// Result of a finished match. Defined if and only if the match is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Winner {
    /// First player won.
    Black,
    /// Second player won.
    White,
    /// Equal piece counts.
    Draw,
}

impl TryFrom<i8> for Winner {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Winner::Black),
            -1 => Ok(Winner::White),
            0 => Ok(Winner::Draw),
            other => Err(format!("invalid winner value: {other}")),
        }
    }
}

impl From<Winner> for i8 {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::Black => 1,
            Winner::White => -1,
            Winner::Draw => 0,
        }
    }
}

/// A zero-based board coordinate, row-major. Wire form is `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Coord {
    /// Row index, `0..8` top to bottom.
    pub row: u8,
    /// Column index, `0..8` left to right.
    pub col: u8,
}

impl Coord {
    /// Creates a coordinate. Both indices must be below [`BOARD_SIZE`].
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (usize::from(row) < BOARD_SIZE && usize::from(col) < BOARD_SIZE)
            .then_some(Self { row, col })
    }
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = String;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(row, col).ok_or_else(|| format!("coordinate out of range: [{row}, {col}]"))
    }
}

impl From<Coord> for (u8, u8) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

/// The 8x8 grid of cell marks, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Disc; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board from explicit cells.
    pub fn new(cells: [[Disc; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Gets the mark at the given coordinate.
    pub fn get(&self, coord: Coord) -> Disc {
        self.cells[usize::from(coord.row)][usize::from(coord.col)]
    }

    /// Counts cells holding the given mark.
    pub fn count(&self, disc: Disc) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == disc)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [[Disc::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }
}

/// The category of adversary selected at match creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpponentKind {
    /// Server-side random policy.
    #[default]
    Random,
    /// Server-side learned policy.
    Agent,
    /// Two humans alternating at the same client.
    Pvp,
}

impl OpponentKind {
    /// Human-readable name for menus and headers.
    pub fn label(self) -> &'static str {
        match self {
            OpponentKind::Random => "Random AI",
            OpponentKind::Agent => "Learned agent",
            OpponentKind::Pvp => "Pass-and-play",
        }
    }
}

/// Authoritative snapshot of one match, as returned by the service.
///
/// The client never derives any of these fields. Each response replaces the
/// previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Opaque match identifier, stable for the match's lifetime.
    pub id: String,
    /// Current grid of cell marks.
    pub board: Board,
    /// Whose turn is active.
    pub player: Side,
    /// Coordinates the active player may place a piece on. Empty when the
    /// match is over or the active player must pass.
    pub legal_moves: Vec<Coord>,
    /// Terminal flag. Once true the state no longer changes.
    pub over: bool,
    /// Signed material count: Black's pieces count positive, White's
    /// negative.
    pub score: i32,
    /// Opponent kind chosen at creation.
    pub opponent: OpponentKind,
    /// Match result, present exactly when `over` is true.
    #[serde(default)]
    pub winner: Option<Winner>,
}

impl MatchState {
    /// True when the cell is empty and in the legal set.
    pub fn is_playable(&self, coord: Coord) -> bool {
        self.board.get(coord) == Disc::Empty && self.legal_moves.contains(&coord)
    }

    /// Splits the signed aggregate score into non-negative per-side counts,
    /// `(black, white)`, each floored at zero.
    pub fn score_pair(&self) -> (u32, u32) {
        score_pair(self.score)
    }

    /// One-line result text for a finished match, `None` while live.
    pub fn outcome_summary(&self) -> Option<String> {
        if !self.over {
            return None;
        }
        let (black, white) = self.score_pair();
        Some(match self.winner {
            Some(Winner::Draw) | None => format!("Draw, {black}-{white}"),
            Some(Winner::Black) => format!("Black wins, {black}-{white}"),
            Some(Winner::White) => format!("White wins, {black}-{white}"),
        })
    }
}

/// Summary projection of one listed match from the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Opaque match identifier.
    pub id: String,
    /// Opponent kind chosen at creation.
    pub opponent: OpponentKind,
    /// Creation time, ISO-8601 UTC on the wire.
    pub created_at: DateTime<Utc>,
    /// Completion time, absent while the match is still active.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    /// Result, absent while the match is still active.
    #[serde(default)]
    pub winner: Option<Winner>,
    /// Signed material count at the time of listing.
    pub score: i32,
}

impl HistoryItem {
    /// One-line result text for a history row.
    pub fn result_label(&self) -> String {
        let (black, white) = score_pair(self.score);
        match self.winner {
            None => "In progress".to_string(),
            Some(Winner::Draw) => format!("Draw, {black}-{white}"),
            Some(Winner::Black) => format!("Black won, {black}-{white}"),
            Some(Winner::White) => format!("White won, {black}-{white}"),
        }
    }
}

fn score_pair(score: i32) -> (u32, u32) {
    (score.max(0) as u32, (-score).max(0) as u32)
}
