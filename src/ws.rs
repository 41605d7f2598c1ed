// MIT/Apache2 License

//! The abstract window-system contract consumed by the replay loop.
//!
//! One trait per capability: a pixel format descriptor, an on-screen drawable, a rendering
//! context, and the window-system runtime that manufactures the other three and owns the
//! current-pair binding state. Each backend supplies exactly one concrete type per trait;
//! the associated types on [`WindowSystem`] let backends hand out their native handles
//! directly instead of downcasting through abstract references.

/// A renderable pixel format chosen by the backend.
///
/// Opaque to the replay loop; drawables and contexts are created from it and reference it
/// for their entire lifetime without owning it. Keeping the format alive while they exist
/// is the caller's obligation.
pub trait PixelFormat {
    /// Whether this format was selected with a back buffer for flicker-free presentation.
    fn double_buffered(&self) -> bool;
}

/// An on-screen surface that rendering is presented to.
pub trait Drawable {
    /// The surface's recorded size in pixels.
    fn size(&self) -> (u32, u32);

    /// Update the recorded size and ask the native system to resize the surface to match.
    ///
    /// Assumed to succeed at the protocol level; native errors are not surfaced here.
    fn resize(&mut self, width: u32, height: u32);

    /// Request presentation of the back buffer.
    ///
    /// Only meaningful if the drawable's format is double-buffered. No synchronization
    /// guarantee beyond whatever the native swap primitive provides.
    fn swap_buffers(&self);
}

/// A GPU rendering context. Carries no surface of its own; it only executes commands
/// against whatever drawable it is bound to.
pub trait Context {}

/// Whether a window system currently has a (drawable, context) pair bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
}

/// The window-system runtime: a connection to the native display server, a factory for the
/// other three capabilities, and the owner of the current-pair binding state.
///
/// All calls are synchronous and must originate from a single thread. The runtime must
/// outlive every object it created; it does not track or clean them up.
pub trait WindowSystem {
    type PixelFormat: PixelFormat;
    type Drawable: Drawable;
    type Context: Context;

    /// Query the native display for the best renderable format satisfying the minimum
    /// constraints (true color, at least one bit per channel and a one-bit depth buffer),
    /// plus the
    /// back-buffer capability when `double_buffered` is set.
    ///
    /// When no matching format exists this fails with a distinguished error rather than
    /// handing back an unusable descriptor.
    fn create_pixel_format(&self, double_buffered: bool) -> crate::Result<Self::PixelFormat>;

    /// Open a visible top-level surface compatible with `format`.
    fn create_drawable(&self, format: &Self::PixelFormat) -> crate::Result<Self::Drawable>;

    /// Create a rendering context compatible with `format`, isolated from every other
    /// context and with direct rendering requested.
    fn create_context(&self, format: &Self::PixelFormat) -> crate::Result<Self::Context>;

    /// Bind the given pair as current for this runtime's connection.
    ///
    /// The runtime records the pair only when both halves are present and the native bind
    /// call succeeded; in every other case the recorded pair is cleared. `(None, None)` is
    /// the documented way to unbind explicitly — its return value is whatever the native
    /// call reports for "no drawable, no context".
    fn make_current(
        &mut self,
        drawable: Option<&Self::Drawable>,
        context: Option<&Self::Context>,
    ) -> bool;

    /// The current binding state of this runtime.
    fn binding_state(&self) -> BindingState;

    /// Drain every pending native event without interpreting it.
    ///
    /// Never blocks once the queue is empty. Always reports success; input handling is not
    /// wired up to the replay loop yet.
    fn process_events(&mut self) -> bool;
}

// The one rule of the binding state machine, shared by every backend: a new pair is recorded
// iff both halves were passed and the native bind succeeded.
pub(crate) fn resolve_binding<D, C>(
    drawable: Option<D>,
    context: Option<C>,
    native_ok: bool,
) -> Option<(D, C)> {
    match (drawable, context) {
        (Some(d), Some(c)) if native_ok => Some((d, c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_binding;

    #[test]
    fn binding_recorded_only_for_full_pair() {
        assert_eq!(resolve_binding(Some(1u32), Some(2u32), true), Some((1, 2)));
        assert_eq!(resolve_binding(Some(1u32), Some(2u32), false), None);
    }

    #[test]
    fn binding_cleared_when_either_half_missing() {
        assert_eq!(resolve_binding(Some(1u32), None::<u32>, true), None);
        assert_eq!(resolve_binding(None::<u32>, Some(2u32), true), None);
        assert_eq!(resolve_binding(None::<u32>, None::<u32>, true), None);
        assert_eq!(resolve_binding(None::<u32>, None::<u32>, false), None);
    }
}
