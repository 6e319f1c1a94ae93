//! Client library for the Othello match service.
//!
//! The service owns the game: legality, flip resolution, scoring, and
//! opponent play all happen remotely. This crate gives a frontend the three
//! pieces it needs to stay consistent with that authority:
//!
//! - **Wire types** ([`MatchState`], [`HistoryItem`] and friends) decoding
//!   the `/api/v1` JSON contract strictly.
//! - **API client** ([`MatchService`] trait, [`MatchClient`] reqwest
//!   implementation) — one request per call, failures carried as a single
//!   [`ApiError`] message.
//! - **Session machine** ([`MatchSession`]) — the phase logic that keeps a
//!   page consistent across asynchronous request/response cycles: busy
//!   guards, wholesale state replacement, error fallback, and dropping of
//!   superseded completions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod session;
mod types;

// Crate-level exports - API client
pub use client::{MatchClient, MatchService};

// Crate-level exports - Errors
pub use error::ApiError;

// Crate-level exports - Session state machine
pub use session::{MatchSession, SessionEvent, SessionPhase};

// Crate-level exports - Domain types
pub use types::{
    BOARD_SIZE, Board, Coord, Disc, HistoryItem, MatchState, OpponentKind, Side, Winner,
};
