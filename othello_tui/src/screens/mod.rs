//! Screen implementations for the page state machine.

mod game;
mod history;
mod home;

pub use game::GameScreen;
pub use history::HistoryScreen;
pub use home::HomeScreen;
