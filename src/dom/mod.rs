//! Headless document model
//!
//! A small element tree standing in for the browser DOM: elements carry
//! attributes, inline style properties, an optional layout box and bound
//! pointer listeners. The catalog loader, theme controller and ripple binder
//! all act on a `Document`; the CLI serializes it to HTML.

pub mod document;
pub mod events;
pub mod html;
pub mod node;

pub use document::{Document, NodePath};
pub use events::{Listener, PointerEvent};
pub use node::{Element, Node, Rect};
