//! The seam between widget controllers and page elements.
//!
//! Controllers never talk to `web_sys` directly. They hold handles that
//! implement [`Node`], which keeps every controller testable on the host
//! with an in-memory node and lets the `wasm32` runtime plug in real DOM
//! elements (see `web.rs`).
//!
//! Every method takes `&self`: element handles are shared references into
//! a document that owns the actual state, the same way `web_sys` handles are.
//! Lookups that can fail return `Option` so callers can skip behavior on
//! malformed markup instead of failing.

/// Horizontal geometry of an element, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

/// Where an element should land when scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Nearest,
    Center,
}

/// A page element as seen by the widget controllers.
pub trait Node: Clone {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    fn text(&self) -> String;

    /// Current value of a form control; empty for anything else.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn is_checked(&self) -> bool;

    fn set_disabled(&self, disabled: bool);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    fn focus(&self);
    fn scroll_into_view(&self, block: ScrollBlock);

    /// Restore a form to its initial values. No-op on non-form elements.
    fn reset(&self);

    /// `None` when the element has no layout box.
    fn bounds(&self) -> Option<Bounds>;
}

/// Read a data attribute, treating an empty value as absent.
pub fn non_empty_attribute<N: Node>(node: &N, name: &str) -> Option<String> {
    node.attribute(name).filter(|v| !v.is_empty())
}
