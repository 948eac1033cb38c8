// src/error.rs

//! # Control Path Errors
//!
//! Conditions that the control loop resolves with a fallback instead of
//! halting. The fallible `try_*` entry points report them; the infallible
//! counterparts used by the scheduler log them and recover.

use core::fmt;

/// The category of a recoverable control path fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Elapsed time was zero, negative or not representable.
    InvalidTiming,
    /// A rescaling input range was degenerate or a value did not fit the
    /// control number type.
    InvalidRange,
}

/// A recoverable control path fault with a short static context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    context: &'static str,
}

impl Error {
    /// Creates an error of the given kind.
    pub const fn new(kind: ErrorKind, context: &'static str) -> Self {
        Self { kind, context }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where the error was detected.
    pub fn context(&self) -> &'static str {
        self.context
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidTiming => f.write_str("invalid timing"),
            ErrorKind::InvalidRange => f.write_str("invalid range"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.context)
    }
}

/// Result alias for the control path.
pub type Result<T> = core::result::Result<T, Error>;
