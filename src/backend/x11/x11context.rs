// MIT/Apache2 License

use super::X11Visual;
use crate::ws::Context;
use core::ptr::{self, NonNull};
use x11nas::{
    glx::{self, GLXContext},
    xlib::{self, Display, VisualID},
};

/// A GLX rendering context.
///
/// Created with no share list and with direct rendering requested; the context graph is
/// fully isolated, as the replay engine expects.
pub struct X11Context {
    // SAFETY: the display is owned by the X11Runtime that created this context. The context
    //         must be dropped before the runtime is.
    display: NonNull<Display>,
    context: GLXContext,
    visual_id: VisualID,
}

impl X11Context {
    pub(crate) fn new(display: NonNull<Display>, visual: &X11Visual) -> crate::Result<Self> {
        log::debug!("Creating a new GLX context");

        log::trace!(
            "C function call: glXCreateContext({:p}, {:p}, null, True)",
            display.as_ptr(),
            visual.info().as_ptr()
        );
        // SAFETY: calls a C function; the result is checked for null before use
        let context = unsafe {
            glx::glXCreateContext(
                display.as_ptr(),
                visual.info().as_ptr(),
                ptr::null_mut(),
                xlib::True,
            )
        };
        log::trace!("Result of C function call: {:p}", context);

        if context.is_null() {
            return Err(crate::X11Error::BadGlxContext.into());
        }

        Ok(X11Context {
            display,
            context,
            visual_id: visual.visual_id(),
        })
    }

    /// The raw GLX context handle.
    #[inline]
    pub fn raw(&self) -> GLXContext {
        self.context
    }

    /// ID of the visual this context was created from.
    #[inline]
    pub fn visual_id(&self) -> VisualID {
        self.visual_id
    }
}

impl Context for X11Context {}

impl Drop for X11Context {
    fn drop(&mut self) {
        log::trace!(
            "C function call: glXDestroyContext({:p}, {:p})",
            self.display.as_ptr(),
            self.context
        );
        unsafe { glx::glXDestroyContext(self.display.as_ptr(), self.context) };
    }
}
