//! Error types.

/// Fatal error conditions.
///
/// Everything recoverable (a property the window manager never set, a
/// window destroyed mid-enumeration) is modeled as an [`Option`] at the
/// call site instead of a variant here.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// A connection to the X server could not be established.
    Connection(&'static str),
    /// The command line did not match the expected shape.
    Usage(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "cannot open X display: {}", msg),
            Self::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type CtlResult<T> = Result<T, Error>;
