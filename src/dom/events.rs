//! Pointer events and the listeners that react to them.

use crate::ripple::RippleStyle;

/// Pointer position in client coordinates, as carried by a mousemove event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// A pointer-move listener bound to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Listener {
    /// Ripple on the element the listener is bound to
    Ripple(RippleStyle),

    /// Ripple on the closest descendant carrying `class`, found between the
    /// event target and the element the listener is bound to
    DelegatedRipple { class: String, style: RippleStyle },
}
