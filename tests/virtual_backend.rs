// MIT/Apache2 License

//! A virtual window system used to test the finer details of the abstract contract without
//! actually linking to a native library: format selection (including the unsatisfiable
//! case), drawable size bookkeeping, the current-pair state machine, and event draining.

use core::cell::Cell;
use glretrace_ws::ws::{BindingState, Context, Drawable, PixelFormat, WindowSystem};
use glretrace_ws::{Error, Result};

// RUST_LOG=trace shows the state transitions while a test runs
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct VirtualFormat {
    double_buffered: bool,
}

impl PixelFormat for VirtualFormat {
    fn double_buffered(&self) -> bool {
        self.double_buffered
    }
}

struct VirtualDrawable {
    id: u32,
    width: u32,
    height: u32,
    swaps: Cell<u32>,
}

impl Drawable for VirtualDrawable {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn swap_buffers(&self) {
        self.swaps.set(self.swaps.get() + 1);
    }
}

struct VirtualContext {
    id: u32,
}

impl Context for VirtualContext {}

/// A display server that exists only in memory. `supports_double_buffer` simulates a native
/// display with no back-buffer capable format.
struct VirtualWindowSystem {
    supports_double_buffer: bool,
    next_id: Cell<u32>,
    current: Option<(u32, u32)>,
    pending_events: usize,
}

impl VirtualWindowSystem {
    fn new(supports_double_buffer: bool) -> Self {
        Self {
            supports_double_buffer,
            next_id: Cell::new(1),
            current: None,
            pending_events: 0,
        }
    }

    fn fresh_id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl WindowSystem for VirtualWindowSystem {
    type PixelFormat = VirtualFormat;
    type Drawable = VirtualDrawable;
    type Context = VirtualContext;

    fn create_pixel_format(&self, double_buffered: bool) -> Result<VirtualFormat> {
        if double_buffered && !self.supports_double_buffer {
            return Err(Error::StaticMsg("no matching virtual pixel format"));
        }
        Ok(VirtualFormat { double_buffered })
    }

    fn create_drawable(&self, _format: &VirtualFormat) -> Result<VirtualDrawable> {
        Ok(VirtualDrawable {
            id: self.fresh_id(),
            width: 256,
            height: 256,
            swaps: Cell::new(0),
        })
    }

    fn create_context(&self, _format: &VirtualFormat) -> Result<VirtualContext> {
        Ok(VirtualContext {
            id: self.fresh_id(),
        })
    }

    fn make_current(
        &mut self,
        drawable: Option<&VirtualDrawable>,
        context: Option<&VirtualContext>,
    ) -> bool {
        // the virtual bind succeeds whenever both halves are present, like a native bind
        // with valid handles
        let ret = drawable.is_some() && context.is_some();
        self.current = match (drawable, context) {
            (Some(d), Some(c)) if ret => Some((d.id, c.id)),
            _ => None,
        };
        ret
    }

    fn binding_state(&self) -> BindingState {
        if self.current.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    fn process_events(&mut self) -> bool {
        while self.pending_events > 0 {
            self.pending_events -= 1;
        }
        true
    }
}

#[test]
fn pixel_format_honors_requested_buffering() {
    init_logging();
    let ws = VirtualWindowSystem::new(true);

    for &db in &[false, true] {
        let format = ws.create_pixel_format(db).unwrap();
        assert_eq!(format.double_buffered(), db);
    }
}

#[test]
fn unsatisfiable_format_is_a_distinguished_failure() {
    init_logging();
    let ws = VirtualWindowSystem::new(false);

    // single-buffered is still satisfiable
    assert!(ws.create_pixel_format(false).is_ok());

    // the double-buffered request fails without panicking, and nothing downstream is
    // created from the missing descriptor
    match ws.create_pixel_format(true) {
        Err(Error::StaticMsg(_)) => {}
        Err(other) => panic!("unexpected error kind: {:?}", other),
        Ok(_) => panic!("expected a no-matching-format error"),
    }
}

#[test]
fn resize_updates_recorded_size() {
    init_logging();
    let ws = VirtualWindowSystem::new(true);
    let format = ws.create_pixel_format(false).unwrap();
    let mut drawable = ws.create_drawable(&format).unwrap();

    assert_eq!(drawable.size(), (256, 256));

    for &(w, h) in &[(512, 300), (1, 1), (1920, 1080)] {
        drawable.resize(w, h);
        assert_eq!(drawable.size(), (w, h));
    }
}

#[test]
fn full_pair_binds_and_explicit_unbind_clears() {
    init_logging();
    let mut ws = VirtualWindowSystem::new(true);
    let format = ws.create_pixel_format(true).unwrap();
    let drawable = ws.create_drawable(&format).unwrap();
    let context = ws.create_context(&format).unwrap();

    assert_eq!(ws.binding_state(), BindingState::Unbound);

    assert!(ws.make_current(Some(&drawable), Some(&context)));
    assert_eq!(ws.binding_state(), BindingState::Bound);
    assert_eq!(ws.current, Some((drawable.id, context.id)));

    // (None, None) is the documented unbind; only the transition is specified, not the
    // boolean result
    ws.make_current(None, None);
    assert_eq!(ws.binding_state(), BindingState::Unbound);
    assert_eq!(ws.current, None);
}

#[test]
fn half_pair_always_unbinds_and_fails() {
    init_logging();
    let mut ws = VirtualWindowSystem::new(true);
    let format = ws.create_pixel_format(false).unwrap();
    let drawable = ws.create_drawable(&format).unwrap();
    let context = ws.create_context(&format).unwrap();

    assert!(ws.make_current(Some(&drawable), Some(&context)));

    assert!(!ws.make_current(Some(&drawable), None));
    assert_eq!(ws.binding_state(), BindingState::Unbound);

    assert!(ws.make_current(Some(&drawable), Some(&context)));

    assert!(!ws.make_current(None, Some(&context)));
    assert_eq!(ws.binding_state(), BindingState::Unbound);
}

#[test]
fn rebinding_replaces_the_previous_pair() {
    init_logging();
    let mut ws = VirtualWindowSystem::new(true);
    let format = ws.create_pixel_format(true).unwrap();
    let first_drawable = ws.create_drawable(&format).unwrap();
    let first_context = ws.create_context(&format).unwrap();
    let second_drawable = ws.create_drawable(&format).unwrap();
    let second_context = ws.create_context(&format).unwrap();

    assert!(ws.make_current(Some(&first_drawable), Some(&first_context)));
    assert!(ws.make_current(Some(&second_drawable), Some(&second_context)));

    assert_eq!(ws.binding_state(), BindingState::Bound);
    assert_eq!(ws.current, Some((second_drawable.id, second_context.id)));
}

#[test]
fn process_events_drains_and_reports_success() {
    init_logging();
    let mut ws = VirtualWindowSystem::new(true);

    // empty queue: returns immediately, still success
    assert!(ws.process_events());

    ws.pending_events = 17;
    assert!(ws.process_events());
    assert_eq!(ws.pending_events, 0);
}

#[test]
fn happy_path_session() {
    init_logging();
    let mut ws = VirtualWindowSystem::new(true);

    let format = ws.create_pixel_format(false).unwrap();
    let mut drawable = ws.create_drawable(&format).unwrap();
    let context = ws.create_context(&format).unwrap();
    assert_eq!(drawable.size(), (256, 256));

    assert!(ws.make_current(Some(&drawable), Some(&context)));
    assert_eq!(ws.binding_state(), BindingState::Bound);

    drawable.resize(512, 300);
    assert_eq!(drawable.size(), (512, 300));

    drawable.swap_buffers();
    assert_eq!(drawable.swaps.get(), 1);

    assert!(ws.process_events());

    // teardown in the documented order: objects first, runtime last
    ws.make_current(None, None);
    drop(drawable);
    drop(context);
    drop(ws);
}
