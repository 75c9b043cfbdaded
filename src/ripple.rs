//! Pointer ripple effect
//!
//! Binds pointer-move listeners to button-like elements. On each move the
//! pointer position relative to the element's bounding box is written to two
//! style properties that the stylesheet uses to place the ripple highlight.
//!
//! `register` binds only the elements present when it is called; anything
//! inserted afterwards needs another call. `delegate` binds once at a stable
//! ancestor instead and covers later insertions too.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, Element, Listener, PointerEvent, Rect};
use crate::error::{Result, ToolshelfError};

/// Class marking button-like elements.
pub const DEFAULT_BUTTON_CLASS: &str = "btn";

/// Names of the style properties receiving the pointer offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleStyle {
    pub x_property: String,
    pub y_property: String,
}

impl Default for RippleStyle {
    fn default() -> Self {
        Self {
            x_property: "--mouse-x".to_string(),
            y_property: "--mouse-y".to_string(),
        }
    }
}

impl RippleStyle {
    /// Write the pointer offsets into the element's style.
    pub fn apply(&self, el: &mut Element, event: &PointerEvent) {
        let (x, y) = offsets(el.rect().unwrap_or_default(), event);
        el.set_style_property(self.x_property.clone(), format!("{}px", x));
        el.set_style_property(self.y_property.clone(), format!("{}px", y));
    }
}

/// Pointer position relative to the box origin. Not clamped: a pointer left
/// of or above the box yields negative values.
pub fn offsets(rect: Rect, event: &PointerEvent) -> (f64, f64) {
    (event.client_x - rect.left, event.client_y - rect.top)
}

/// Binder for the ripple listeners
#[derive(Debug, Clone)]
pub struct PointerRipple {
    button_class: String,
    style: RippleStyle,
}

impl Default for PointerRipple {
    fn default() -> Self {
        Self::new(DEFAULT_BUTTON_CLASS, RippleStyle::default())
    }
}

impl PointerRipple {
    pub fn new(button_class: impl Into<String>, style: RippleStyle) -> Self {
        Self {
            button_class: button_class.into(),
            style,
        }
    }

    /// Bind a listener to every button-like element currently in the
    /// document. Returns the number of newly bound elements; elements bound
    /// by an earlier call are left alone.
    pub fn register(&self, doc: &mut Document) -> usize {
        let mut bound = 0;
        for path in doc.query_class(&self.button_class) {
            if let Some(el) = doc.element_at_mut(&path) {
                if el.add_listener(Listener::Ripple(self.style.clone())) {
                    bound += 1;
                }
            }
        }
        debug!("ripple bound to {} new .{} elements", bound, self.button_class);
        bound
    }

    /// Bind one listener at the element with `ancestor_id`, handling moves
    /// over any button-like descendant, present or future.
    pub fn delegate(&self, doc: &mut Document, ancestor_id: &str) -> Result<()> {
        let el = doc
            .get_element_by_id_mut(ancestor_id)
            .ok_or_else(|| ToolshelfError::MissingElement(ancestor_id.to_string()))?;
        el.add_listener(Listener::DelegatedRipple {
            class: self.button_class.clone(),
            style: self.style.clone(),
        });
        debug!("ripple delegated at #{}", ancestor_id);
        Ok(())
    }
}
