// MIT/Apache2 License

use core::fmt;

mod x11;
pub use x11::X11Error;

/// Container for all errors that can happen.
///
/// For convenience, all fallible operations in `glretrace-ws` return this `Error` type. It
/// collects every error any backend can produce.
#[derive(Debug)]
pub enum Error {
    /// An error described only by a message. Mostly used by testing backends.
    StaticMsg(&'static str),
    /// An X11 error has occurred.
    X11(X11Error),
}

impl From<X11Error> for Error {
    #[inline]
    fn from(x: X11Error) -> Error {
        Self::X11(x)
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticMsg(s) => f.write_str(s),
            Self::X11(ref x) => fmt::Display::fmt(x, f),
        }
    }
}

impl std::error::Error for Error {}

/// Result type, for convenience.
pub type Result<T> = core::result::Result<T, Error>;
