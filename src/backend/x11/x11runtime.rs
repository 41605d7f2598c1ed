// MIT/Apache2 License

use super::{X11Context, X11Drawable, X11Visual};
use crate::ws::{self, BindingState, WindowSystem};
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use cty::c_int;
use x11nas::{
    glx::{self, GLXContext},
    xlib::{self, Display, Window},
};

/// The X11 window-system runtime: one connection to the display server, the default screen
/// of that connection, and the currently bound (drawable, context) pair.
///
/// One runtime exists for the life of a replay session. All calls are synchronous and must
/// come from the session's single control thread. The runtime does not track the objects it
/// creates; every drawable and context must be dropped before the runtime is.
pub struct X11Runtime {
    display: NonNull<Display>,
    screen: c_int,

    // the pair recorded by the last successful make_current; native handles only, so a
    // stale entry cannot keep a destroyed object alive
    current: Option<(Window, GLXContext)>,
}

impl X11Runtime {
    /// Open a connection to the default X11 display target.
    ///
    /// There is no recovery path when the display cannot be reached; the replay session
    /// treats this error as fatal.
    pub fn new() -> crate::Result<Self> {
        log::info!("Creating a new X11 runtime");

        log::debug!("Opening up the X11 display connection");
        log::trace!("C function call: XOpenDisplay(null)");
        // SAFETY: calling a C function whose result we check
        let display_ptr = unsafe { xlib::XOpenDisplay(ptr::null()) };
        let display = match NonNull::new(display_ptr) {
            Some(dpy) => dpy,
            None => return Err(crate::X11Error::DisplayDidntOpen.into()),
        };

        log::debug!("Getting the default screen");
        log::trace!("C function call: XDefaultScreen({:p})", display.as_ptr());
        let screen = unsafe { xlib::XDefaultScreen(display.as_ptr()) };
        log::trace!("Result of C function call: {}", screen);

        Ok(X11Runtime {
            display,
            screen,
            current: None,
        })
    }

    /// The underlying display connection, for callers with their own FFI needs.
    #[inline]
    pub fn display(&self) -> NonNull<Display> {
        self.display
    }

    /// The default screen of this runtime's connection.
    #[inline]
    pub fn screen(&self) -> c_int {
        self.screen
    }

    /// XID of the drawable recorded by the last successful bind, if any.
    #[inline]
    pub fn current_drawable(&self) -> Option<Window> {
        self.current.map(|(window, _)| window)
    }

    /// Handle of the context recorded by the last successful bind, if any.
    #[inline]
    pub fn current_context(&self) -> Option<GLXContext> {
        self.current.map(|(_, context)| context)
    }
}

impl WindowSystem for X11Runtime {
    type PixelFormat = X11Visual;
    type Drawable = X11Drawable;
    type Context = X11Context;

    fn create_pixel_format(&self, double_buffered: bool) -> crate::Result<X11Visual> {
        X11Visual::choose(self.display, self.screen, double_buffered)
    }

    fn create_drawable(&self, format: &X11Visual) -> crate::Result<X11Drawable> {
        X11Drawable::new(self.display, self.screen, format)
    }

    fn create_context(&self, format: &X11Visual) -> crate::Result<X11Context> {
        X11Context::new(self.display, format)
    }

    fn make_current(
        &mut self,
        drawable: Option<&X11Drawable>,
        context: Option<&X11Context>,
    ) -> bool {
        let window: Window = drawable.map_or(0, X11Drawable::xid);
        let ctx: GLXContext = context.map_or(ptr::null_mut(), X11Context::raw);

        log::trace!(
            "C function call: glXMakeCurrent({:p}, {}, {:p})",
            self.display.as_ptr(),
            window,
            ctx
        );
        let ret = unsafe { glx::glXMakeCurrent(self.display.as_ptr(), window, ctx) } != 0;
        log::trace!("Result of C function call: {}", ret);

        self.current = ws::resolve_binding(
            drawable.map(X11Drawable::xid),
            context.map(X11Context::raw),
            ret,
        );

        ret
    }

    #[inline]
    fn binding_state(&self) -> BindingState {
        if self.current.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    fn process_events(&mut self) -> bool {
        // bounded drain: loops only while events are already queued, never waits for more
        loop {
            log::trace!("C function call: XPending({:p})", self.display.as_ptr());
            if unsafe { xlib::XPending(self.display.as_ptr()) } <= 0 {
                break;
            }

            let mut event: MaybeUninit<xlib::XEvent> = MaybeUninit::uninit();
            log::trace!(
                "C function call: XNextEvent({:p}, [buffer])",
                self.display.as_ptr()
            );
            unsafe { xlib::XNextEvent(self.display.as_ptr(), event.as_mut_ptr()) };
            // TODO: translate input events and hand them to the replay loop
        }

        true
    }
}

impl Drop for X11Runtime {
    fn drop(&mut self) {
        // SAFETY: even if this somehow goes awry, we're disposing of the display anyways
        log::trace!("C function call: XCloseDisplay({:p})", self.display.as_ptr());
        unsafe { xlib::XCloseDisplay(self.display.as_ptr()) };
    }
}
