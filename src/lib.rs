// MIT/Apache2 License

//! `glretrace-ws` provides the native window-system backends used when replaying a captured
//! stream of GL commands: somewhere to render into, and some way to put the result on screen.
//!
//! The crate is split into an abstract capability surface and one concrete backend per
//! supported platform. The replay loop only ever talks to the traits in [`ws`]; the backends
//! wire those traits to the native display server.
//!
//! ## Supported Backends
//!
//! * xlib/GLX - The X11 library commonly used on Unix and Unix-like platforms, paired with the
//!   GLX extension for context creation and presentation.
//!
//! ## Example
//!
//! The replay loop obtains a pixel format, a drawable and a context from the runtime, binds
//! the pair, and swaps after each frame:
//!
//! ```no_run
//! use glretrace_ws::ws::{Drawable, WindowSystem};
//!
//! # fn run() -> glretrace_ws::Result<()> {
//! env_logger::init();
//!
//! let mut ws = glretrace_ws::backend::x11::X11Runtime::new()?;
//!
//! let format = ws.create_pixel_format(true)?;
//! let drawable = ws.create_drawable(&format)?;
//! let context = ws.create_context(&format)?;
//!
//! assert!(ws.make_current(Some(&drawable), Some(&context)));
//!
//! // ... replay a frame ...
//! drawable.swap_buffers();
//! ws.process_events();
//! # Ok(())
//! # }
//! ```
//!
//! Every `create_*` result is released by dropping it. Drawables and contexts must be dropped
//! before the runtime that created them, and the pixel format they were created from must stay
//! alive for as long as they do; neither rule is runtime-checked.

#![warn(clippy::pedantic)]

pub mod backend;
pub mod error;
pub mod ws;

pub use error::*;
