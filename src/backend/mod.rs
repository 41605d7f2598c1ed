// MIT/Apache2 License

//! The native backends. Each backend implements the capability traits in [`crate::ws`] over
//! one windowing library; only the X11/GLX backend is wired up today.

#[cfg(unix)]
pub mod x11;

/// Open the native window system for this platform.
///
/// The replay engine calls this once at session startup; failure to reach the display server
/// is fatal to the session, there is no fallback.
#[cfg(unix)]
pub fn open_native() -> crate::Result<x11::X11Runtime> {
    x11::X11Runtime::new()
}
