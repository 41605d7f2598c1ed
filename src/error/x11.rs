// MIT/Apache2 License

use core::fmt;

#[derive(Debug)]
pub enum X11Error {
    DisplayDidntOpen,
    NoMatchingVisual { double_buffered: bool },
    BadGlxContext,
}

impl fmt::Display for X11Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisplayDidntOpen => f.write_str("Unable to open connection to X11 server"),
            Self::NoMatchingVisual { double_buffered } => write!(
                f,
                "No GLX visual satisfies the minimum constraints for {} rendering",
                if *double_buffered {
                    "double-buffered"
                } else {
                    "single-buffered"
                }
            ),
            Self::BadGlxContext => {
                f.write_str("The glXCreateContext() function returned a null pointer")
            }
        }
    }
}
