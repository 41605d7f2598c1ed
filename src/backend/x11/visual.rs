// MIT/Apache2 License

use crate::ws::PixelFormat;
use core::ptr::NonNull;
use cty::{c_int, c_void};
use x11nas::{
    glx,
    xlib::{self, Display, VisualID, XVisualInfo},
};

/// A GLX visual selected for rendering.
///
/// Owns the `XVisualInfo` handed out by `glXChooseVisual` and frees it on drop. Drawables
/// and contexts created from this visual keep only its ID; the caller must keep the visual
/// alive for as long as they exist.
pub struct X11Visual {
    info: NonNull<XVisualInfo>,
    double_buffered: bool,
}

impl X11Visual {
    pub(crate) fn choose(
        display: NonNull<Display>,
        screen: c_int,
        double_buffered: bool,
    ) -> crate::Result<Self> {
        log::debug!(
            "Choosing a {} GLX visual on screen #{}",
            if double_buffered { "double-buffered" } else { "single-buffered" },
            screen
        );

        let mut attribs = visual_attribs(double_buffered);

        log::trace!(
            "C function call: glXChooseVisual({:p}, {}, {:?})",
            display.as_ptr(),
            screen,
            attribs
        );
        // SAFETY: calls a C function; the attribute list is zero-terminated and the result
        //         is checked before use
        let info = unsafe { glx::glXChooseVisual(display.as_ptr(), screen, attribs.as_mut_ptr()) };
        log::trace!("Result of C function call: {:p}", info);

        match NonNull::new(info) {
            Some(info) => Ok(X11Visual {
                info,
                double_buffered,
            }),
            None => Err(crate::X11Error::NoMatchingVisual { double_buffered }.into()),
        }
    }

    #[inline]
    pub(crate) fn info(&self) -> NonNull<XVisualInfo> {
        self.info
    }

    #[inline]
    pub fn depth(&self) -> c_int {
        // SAFETY: the pointer is non-null and owned by us until drop
        unsafe { self.info.as_ref() }.depth
    }

    #[inline]
    pub fn visual_id(&self) -> VisualID {
        unsafe { self.info.as_ref() }.visualid
    }
}

impl PixelFormat for X11Visual {
    #[inline]
    fn double_buffered(&self) -> bool {
        self.double_buffered
    }
}

impl Drop for X11Visual {
    fn drop(&mut self) {
        // note: X11 expects us to free the visual info it allocated
        log::trace!("C function call: XFree({:p})", self.info.as_ptr());
        unsafe { xlib::XFree(self.info.as_ptr() as *mut c_void) };
    }
}

// Minimum constraints for a renderable format: true color RGBA with at least one bit per
// channel and a one-bit depth buffer. A double-buffered request additionally demands the
// back-buffer capability bit.
fn visual_attribs(double_buffered: bool) -> Vec<c_int> {
    let mut attribs = vec![
        glx::GLX_RGBA,
        glx::GLX_RED_SIZE,
        1,
        glx::GLX_GREEN_SIZE,
        1,
        glx::GLX_BLUE_SIZE,
        1,
    ];

    if double_buffered {
        attribs.push(glx::GLX_DOUBLEBUFFER);
    }

    attribs.extend_from_slice(&[glx::GLX_DEPTH_SIZE, 1, 0]);
    attribs
}
