//! Arbiter engine error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Arbiter engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for the Arbiter engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A coordinate was constructed with a row or column outside 0-7.
    CoordinateOutOfBounds,
    /// Coordinate parse string malformed.
    ParseCoordinateMalformed,

    /// A move was constructed with mutually exclusive special-move flags.
    MoveConflictingFlags,
    /// A promotion target was set on a move whose piece is not a pawn.
    MovePromotionNotPawn,

    /// An illegal move was provided while replaying a move sequence.
    GameIllegalMove,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CoordinateOutOfBounds => "coordinate out of bounds",
            ErrorKind::ParseCoordinateMalformed => "parse coordinate malformed",

            ErrorKind::MoveConflictingFlags => "move conflicting special flags",
            ErrorKind::MovePromotionNotPawn => "move promotion on non-pawn",

            ErrorKind::GameIllegalMove => "game replay illegal move",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the Arbiter engine.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind) => *error_kind,
            Error::Message(error_kind, _) => *error_kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}
