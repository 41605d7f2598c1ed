// MIT/Apache2 License

use super::X11Visual;
use crate::ws::Drawable;
use core::{
    mem::MaybeUninit,
    ptr::{self, NonNull},
};
use cty::{c_char, c_int, c_uint, c_ulong};
use x11nas::{
    glx,
    xlib::{self, Colormap, Display, VisualID, Window, XSetWindowAttributes, XSizeHints},
};

// every drawable opens at the origin with this fixed size; the replay stream resizes it to
// match the captured surface afterwards
const INITIAL_WIDTH: u32 = 256;
const INITIAL_HEIGHT: u32 = 256;

const WINDOW_TITLE: &[u8] = b"glretrace\0";

/// An on-screen X11 window used as a render target.
pub struct X11Drawable {
    // SAFETY: the display is owned by the X11Runtime that created this drawable. The
    //         drawable must be dropped before the runtime is.
    display: NonNull<Display>,
    window: Window,
    colormap: Colormap,
    visual_id: VisualID,
    width: u32,
    height: u32,
}

impl X11Drawable {
    pub(crate) fn new(
        display: NonNull<Display>,
        screen: c_int,
        visual: &X11Visual,
    ) -> crate::Result<Self> {
        log::debug!("Creating a new X11 drawable");

        log::trace!("C function call: XRootWindow({:p}, {})", display.as_ptr(), screen);
        let root = unsafe { xlib::XRootWindow(display.as_ptr(), screen) };

        // SAFETY: the visual outlives this call; only depth and the visual pointer are read
        let visinfo = unsafe { visual.info().as_ref() };

        log::trace!(
            "C function call: XCreateColormap({:p}, {}, {:p}, AllocNone)",
            display.as_ptr(),
            root,
            visinfo.visual
        );
        let colormap =
            unsafe { xlib::XCreateColormap(display.as_ptr(), root, visinfo.visual, xlib::AllocNone) };

        log::trace!("Unsafe code: MaybeUninit for partial initialization of XSetWindowAttributes");
        let mut window_attrs = XSetWindowAttributes {
            background_pixel: 0,
            border_pixel: 0,
            colormap,
            event_mask: xlib::StructureNotifyMask | xlib::ExposureMask | xlib::KeyPressMask,
            // SAFETY: X11 only reads the attributes selected by the mask below
            ..unsafe { MaybeUninit::uninit().assume_init() }
        };
        let attrs_mask: c_ulong =
            xlib::CWBackPixel | xlib::CWBorderPixel | xlib::CWColormap | xlib::CWEventMask;

        let (x, y): (c_int, c_int) = (0, 0);

        log::debug!("Creating the actual X11 window");
        let window = unsafe {
            xlib::XCreateWindow(
                display.as_ptr(),
                root,
                x,
                y,
                INITIAL_WIDTH as c_uint,
                INITIAL_HEIGHT as c_uint,
                0,
                visinfo.depth,
                xlib::InputOutput as c_uint,
                visinfo.visual,
                attrs_mask,
                &mut window_attrs,
            )
        };
        log::trace!("Result of C function call: {}", window);

        // the window manager is told the position and size were user-specified so that it
        // keeps the surface where the replay expects it
        let mut sizehints = XSizeHints {
            x,
            y,
            width: INITIAL_WIDTH as c_int,
            height: INITIAL_HEIGHT as c_int,
            flags: xlib::USSize | xlib::USPosition,
            // SAFETY: only the fields selected by `flags` are read
            ..unsafe { MaybeUninit::uninit().assume_init() }
        };
        log::trace!(
            "C function call: XSetNormalHints({:p}, {}, [hints])",
            display.as_ptr(),
            window
        );
        unsafe { xlib::XSetNormalHints(display.as_ptr(), window, &mut sizehints) };

        log::trace!(
            "C function call: XSetStandardProperties({:p}, {}, \"glretrace\", ...)",
            display.as_ptr(),
            window
        );
        unsafe {
            xlib::XSetStandardProperties(
                display.as_ptr(),
                window,
                WINDOW_TITLE.as_ptr() as *const c_char,
                WINDOW_TITLE.as_ptr() as *const c_char,
                0,
                ptr::null_mut(),
                0,
                &mut sizehints,
            )
        };

        log::debug!("Mapping the window to make it visible");
        log::trace!("C function call: XMapWindow({:p}, {})", display.as_ptr(), window);
        unsafe { xlib::XMapWindow(display.as_ptr(), window) };

        Ok(X11Drawable {
            display,
            window,
            colormap,
            visual_id: visual.visual_id(),
            width: INITIAL_WIDTH,
            height: INITIAL_HEIGHT,
        })
    }

    /// The XID of the underlying window.
    #[inline]
    pub fn xid(&self) -> Window {
        self.window
    }

    /// ID of the visual this drawable was created from.
    #[inline]
    pub fn visual_id(&self) -> VisualID {
        self.visual_id
    }
}

impl Drawable for X11Drawable {
    #[inline]
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        log::trace!(
            "C function call: XResizeWindow({:p}, {}, {}, {})",
            self.display.as_ptr(),
            self.window,
            width,
            height
        );
        unsafe {
            xlib::XResizeWindow(
                self.display.as_ptr(),
                self.window,
                width as c_uint,
                height as c_uint,
            )
        };
    }

    fn swap_buffers(&self) {
        log::trace!(
            "C function call: glXSwapBuffers({:p}, {})",
            self.display.as_ptr(),
            self.window
        );
        unsafe { glx::glXSwapBuffers(self.display.as_ptr(), self.window) };
    }
}

impl Drop for X11Drawable {
    fn drop(&mut self) {
        log::trace!(
            "C function call: XDestroyWindow({:p}, {})",
            self.display.as_ptr(),
            self.window
        );
        unsafe {
            xlib::XDestroyWindow(self.display.as_ptr(), self.window);
            xlib::XFreeColormap(self.display.as_ptr(), self.colormap);
        }
    }
}
