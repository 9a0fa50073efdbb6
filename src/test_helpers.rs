//! Shared test utilities for the widget controllers.
//!
//! Provides [`MemoryNode`], an in-memory [`Node`] that records every write a
//! controller makes, plus builders for the element groups each controller
//! expects (slider parts, contact form fields, accordion items).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let parts = slider_parts(50);
//! let mut slider = Slider::mount(parts.clone(), SliderSteps::default());
//! slider.set_position(30);
//! assert_eq!(parts.handle.style("left").as_deref(), Some("30%"));
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::accordion::AccordionItem;
use crate::dom::{Bounds, Node, ScrollBlock};
use crate::form::{FieldBinding, FieldControl, FormParts};
use crate::rules::FieldId;
use crate::slider::SliderParts;

// =========================================================================
// In-memory node
// =========================================================================

#[derive(Debug, Default)]
struct NodeData {
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    checked: bool,
    disabled: bool,
    bounds: Option<Bounds>,
    focus_count: usize,
    scrolls: Vec<ScrollBlock>,
    reset_count: usize,
    on_focus: FocusHook,
}

/// Runs when the node gains focus, like a `blur` listener on whatever lost it.
#[derive(Clone, Default)]
struct FocusHook(Option<Rc<dyn Fn()>>);

impl fmt::Debug for FocusHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() { "FocusHook(set)" } else { "FocusHook(none)" })
    }
}

/// A node whose state lives in a shared cell. Clones alias the same node.
#[derive(Debug, Clone, Default)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl MemoryNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_bounds(self, left: f64, width: f64) -> Self {
        self.0.borrow_mut().bounds = Some(Bounds { left, width });
        self
    }

    pub fn set_checked(&self, checked: bool) {
        self.0.borrow_mut().checked = checked;
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    /// Run `hook` every time the node is focused.
    pub fn on_focus(&self, hook: impl Fn() + 'static) {
        self.0.borrow_mut().on_focus = FocusHook(Some(Rc::new(hook)));
    }

    pub fn focus_count(&self) -> usize {
        self.0.borrow().focus_count
    }

    pub fn scrolls(&self) -> Vec<ScrollBlock> {
        self.0.borrow().scrolls.clone()
    }

    pub fn reset_count(&self) -> usize {
        self.0.borrow().reset_count
    }

    /// Simulate what `HTMLFormElement.reset()` does to a control.
    pub fn clear_control(&self) {
        let mut data = self.0.borrow_mut();
        data.value.clear();
        data.checked = false;
    }
}

impl Node for MemoryNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn is_checked(&self) -> bool {
        self.0.borrow().checked
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn focus(&self) {
        let hook = {
            let mut data = self.0.borrow_mut();
            data.focus_count += 1;
            data.on_focus.0.clone()
        };
        if let Some(hook) = hook {
            hook();
        }
    }

    fn scroll_into_view(&self, block: ScrollBlock) {
        self.0.borrow_mut().scrolls.push(block);
    }

    fn reset(&self) {
        self.0.borrow_mut().reset_count += 1;
    }

    fn bounds(&self) -> Option<Bounds> {
        self.0.borrow().bounds
    }
}

// =========================================================================
// Element group builders
// =========================================================================

/// Slider parts with a 200px-wide container starting at x = 100.
pub fn slider_parts(initial: u8) -> SliderParts<MemoryNode> {
    SliderParts {
        container: Some(MemoryNode::new().with_bounds(100.0, 200.0)),
        range: MemoryNode::new().with_value(&initial.to_string()),
        before: MemoryNode::new(),
        handle: MemoryNode::new(),
    }
}

/// Handles onto every element of a contact form built by [`contact_form`].
pub struct FormFixture {
    pub form: MemoryNode,
    pub submit: MemoryNode,
    pub name: MemoryNode,
    pub tel: MemoryNode,
    pub email: MemoryNode,
    pub phone_option: MemoryNode,
    pub mail_option: MemoryNode,
    pub privacy: MemoryNode,
    pub slots: BTreeMap<FieldId, MemoryNode>,
}

impl FormFixture {
    pub fn slot(&self, field: FieldId) -> &MemoryNode {
        &self.slots[&field]
    }

    /// Fill every field with a value that passes its rule.
    pub fn fill_valid(&self) {
        self.name.set_value("山田 太郎");
        self.tel.set_value("03-1234-5678");
        self.email.set_value("taro@example.jp");
        self.phone_option.set_checked(true);
        self.privacy.set_checked(true);
    }

    /// Simulate the browser's form reset across all controls.
    pub fn clear_controls(&self) {
        for node in [
            &self.name,
            &self.tel,
            &self.email,
            &self.phone_option,
            &self.mail_option,
            &self.privacy,
        ] {
            node.clear_control();
        }
    }
}

/// A complete contact form: five fields, each with its own error slot.
pub fn contact_form() -> (FormParts<MemoryNode>, FormFixture) {
    let form = MemoryNode::new();
    let submit = MemoryNode::new();
    submit.set_text("送信する");
    let name = MemoryNode::new();
    let tel = MemoryNode::new();
    let email = MemoryNode::new();
    let phone_option = MemoryNode::new().with_value("phone");
    let mail_option = MemoryNode::new().with_value("email");
    let privacy = MemoryNode::new();

    let slots: BTreeMap<FieldId, MemoryNode> =
        FieldId::ALL.iter().map(|f| (*f, MemoryNode::new())).collect();

    let fields = vec![
        FieldBinding {
            field: FieldId::Name,
            control: FieldControl::Text(name.clone()),
            error_slot: Some(slots[&FieldId::Name].clone()),
        },
        FieldBinding {
            field: FieldId::Tel,
            control: FieldControl::Text(tel.clone()),
            error_slot: Some(slots[&FieldId::Tel].clone()),
        },
        FieldBinding {
            field: FieldId::Email,
            control: FieldControl::Text(email.clone()),
            error_slot: Some(slots[&FieldId::Email].clone()),
        },
        FieldBinding {
            field: FieldId::ContactMethod,
            control: FieldControl::RadioGroup(vec![phone_option.clone(), mail_option.clone()]),
            error_slot: Some(slots[&FieldId::ContactMethod].clone()),
        },
        FieldBinding {
            field: FieldId::Privacy,
            control: FieldControl::Checkbox(privacy.clone()),
            error_slot: Some(slots[&FieldId::Privacy].clone()),
        },
    ];

    let parts = FormParts {
        form: form.clone(),
        submit: Some(submit.clone()),
        fields,
    };
    let fixture = FormFixture {
        form,
        submit,
        name,
        tel,
        email,
        phone_option,
        mail_option,
        privacy,
        slots,
    };
    (parts, fixture)
}

/// An accordion item whose trigger starts collapsed.
pub fn accordion_item(key: &str) -> AccordionItem<MemoryNode> {
    AccordionItem {
        key: key.to_string(),
        trigger: MemoryNode::new()
            .with_attribute("data-accordion", key)
            .with_attribute("aria-expanded", "false"),
        panel: MemoryNode::new().with_attribute("aria-hidden", "true"),
    }
}
