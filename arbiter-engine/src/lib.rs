pub mod board;
pub mod coretypes;
pub mod error;
pub mod game;
pub mod movegen;
pub mod movelist;
pub mod validator;

pub use board::Board;
pub use game::Game;
