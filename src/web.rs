//! Browser runtime: mounts every widget controller on the live document.
//!
//! Compiled only for `wasm32`. `wasm-pack build --target web` links this
//! module into `pkg/`, and the page's loader script imports it; the
//! `start` entry point runs as soon as the module is instantiated.
//!
//! Everything mounted here lives for the page's lifetime. Listeners and
//! controllers are parked in a thread-local [`Page`] record; the only timer
//! (the simulated submit delay) is owned by the form's [`FormRuntime`] and is
//! cancelled when that record drops or when the page is hidden.
//!
//! Missing elements are skipped per widget, the same way the controllers
//! skip missing parts.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
    KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    TouchEvent, Window,
};

use crate::accordion::{Accordion, AccordionItem, panel_id};
use crate::cases::{CaseParts, CaseSwitcher};
use crate::dom::{Bounds, Node, ScrollBlock};
use crate::form::{
    ContactForm, FieldBinding, FieldControl, FormParts, SubmitOutcome, SubmitTicket, submit_shared,
};
use crate::rules::FieldId;
use crate::settings::{FormSettings, SETTINGS_ELEMENT_ID, SliderSettings, WidgetSettings};
use crate::slider::{Slider, SliderParts, SliderSteps};

// ============================================================================
// Node implementation over web_sys
// ============================================================================

#[derive(Debug, Clone)]
pub struct WebNode(Element);

impl WebNode {
    pub fn element(&self) -> &Element {
        &self.0
    }

    fn input(&self) -> Option<&HtmlInputElement> {
        self.0.dyn_ref::<HtmlInputElement>()
    }
}

impl Node for WebNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.0.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn value(&self) -> String {
        self.input().map(HtmlInputElement::value).unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.input() {
            input.set_value(value);
        }
    }

    fn is_checked(&self) -> bool {
        self.input().is_some_and(HtmlInputElement::checked)
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn focus(&self) {
        if let Some(el) = self.0.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn scroll_into_view(&self, block: ScrollBlock) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(match block {
            ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
            ScrollBlock::Center => ScrollLogicalPosition::Center,
        });
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn reset(&self) {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn bounds(&self) -> Option<Bounds> {
        let rect = self.0.get_bounding_client_rect();
        Some(Bounds {
            left: rect.left(),
            width: rect.width(),
        })
    }
}

// ============================================================================
// Lookup helpers
// ============================================================================

fn query_in(root: &Element, selector: &str) -> Option<WebNode> {
    root.query_selector(selector).ok().flatten().map(WebNode)
}

fn query_all_in_document(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements_of(&list))
        .unwrap_or_default()
}

fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements_of(&list))
        .unwrap_or_default()
}

fn elements_of(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn mouse_x(event: &Event) -> Option<f64> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|e| f64::from(e.client_x()))
}

fn touch_x(event: &Event) -> Option<f64> {
    event
        .dyn_ref::<TouchEvent>()
        .and_then(|e| e.touches().get(0))
        .map(|t| f64::from(t.client_x()))
}

fn pointer_x(event: &Event) -> Option<f64> {
    mouse_x(event).or_else(|| touch_x(event))
}

fn active_listener(
    target: &web_sys::EventTarget,
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> EventListener {
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
}

// ============================================================================
// Mounting
// ============================================================================

type SharedSlider = Rc<RefCell<Slider<WebNode>>>;

/// Everything mounted on the page, kept alive until the page goes away.
struct Page {
    _listeners: Vec<EventListener>,
    _sliders: Vec<Option<SharedSlider>>,
    _form: Option<Rc<FormRuntime>>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let doc = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            mount(&window, &doc);
        })
        .forget();
    } else {
        mount(&window, &document);
    }
    Ok(())
}

/// Set on `<html>` once every widget is mounted.
pub const READY_ATTRIBUTE: &str = "data-widgets";

fn mount(window: &Window, document: &Document) {
    let raw_settings = document
        .get_element_by_id(SETTINGS_ELEMENT_ID)
        .and_then(|el| el.text_content());
    let settings = WidgetSettings::from_embedded_json(raw_settings.as_deref());

    let mut listeners = Vec::new();
    let sliders = mount_sliders(document, &settings.slider, &mut listeners);
    let first_slider = sliders.first().cloned().flatten();
    mount_cases(document, first_slider, &mut listeners);
    mount_accordion(window, document, &mut listeners);
    let form = mount_form(window, document, &settings.form, &mut listeners);

    tracing::debug!(
        sliders = sliders.iter().flatten().count(),
        listeners = listeners.len(),
        "widgets mounted"
    );
    PAGE.with(|page| {
        *page.borrow_mut() = Some(Page {
            _listeners: listeners,
            _sliders: sliders,
            _form: form,
        });
    });

    if let Some(root) = document.document_element() {
        let _ = root.set_attribute(READY_ATTRIBUTE, "ready");
    }
}

/// Mount every `.ba` widget. The result is index-aligned with the `.ba`
/// elements; widgets missing a required part are `None`.
fn mount_sliders(
    document: &Document,
    settings: &SliderSettings,
    listeners: &mut Vec<EventListener>,
) -> Vec<Option<SharedSlider>> {
    let steps = SliderSteps::from(settings);
    query_all_in_document(document, ".ba")
        .iter()
        .map(|ba| {
            let (Some(range), Some(before), Some(handle)) = (
                query_in(ba, ".ba__slider"),
                query_in(ba, ".ba__image--before"),
                query_in(ba, ".ba__handle"),
            ) else {
                return None;
            };
            let container = query_in(ba, ".ba__container");
            let parts = SliderParts {
                container: container.clone(),
                range: range.clone(),
                before,
                handle,
            };
            let slider = Rc::new(RefCell::new(Slider::mount(parts, steps)));

            let s = Rc::clone(&slider);
            let r = range.clone();
            listeners.push(EventListener::new(range.element(), "input", move |_| {
                s.borrow_mut().on_input(&r.value());
            }));

            let s = Rc::clone(&slider);
            listeners.push(active_listener(range.element(), "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if s.borrow_mut().on_key(&key.key(), key.shift_key()) {
                    event.prevent_default();
                }
            }));

            if let Some(container) = &container {
                for event_type in ["mousedown", "touchstart"] {
                    let s = Rc::clone(&slider);
                    listeners.push(active_listener(container.element(), event_type, move |event| {
                        if let Some(x) = pointer_x(event) {
                            if s.borrow_mut().begin_drag(x) {
                                event.prevent_default();
                            }
                        }
                    }));
                }
            }

            for event_type in ["mousemove", "touchmove"] {
                let s = Rc::clone(&slider);
                listeners.push(active_listener(document, event_type, move |event| {
                    if let Some(x) = pointer_x(event) {
                        s.borrow_mut().drag_to(x);
                    }
                }));
            }
            for event_type in ["mouseup", "touchend"] {
                let s = Rc::clone(&slider);
                listeners.push(EventListener::new(document, event_type, move |_| {
                    s.borrow_mut().end_drag();
                }));
            }

            Some(slider)
        })
        .collect()
}

fn mount_cases(
    document: &Document,
    slider: Option<SharedSlider>,
    listeners: &mut Vec<EventListener>,
) {
    let Some(ba) = document.query_selector(".ba").ok().flatten() else {
        return;
    };
    let (Some(before), Some(after)) = (
        query_in(&ba, ".ba__image--before"),
        query_in(&ba, ".ba__image--after"),
    ) else {
        return;
    };
    let thumbs: Vec<WebNode> = query_all_in_document(document, ".cases__thumb")
        .into_iter()
        .map(WebNode)
        .collect();
    let parts = CaseParts {
        caption: query_in(&ba, ".cases__caption"),
        root: WebNode(ba),
        before,
        after,
        thumbs: thumbs.clone(),
    };
    let switcher = Rc::new(RefCell::new(CaseSwitcher::mount(parts)));

    for (index, thumb) in thumbs.iter().enumerate() {
        let switcher = Rc::clone(&switcher);
        let slider = slider.clone();
        listeners.push(EventListener::new(thumb.element(), "click", move |_| {
            let mut guard = slider.as_ref().map(|s| s.borrow_mut());
            switcher.borrow_mut().select(index, guard.as_deref_mut());
        }));
    }
}

fn mount_accordion(window: &Window, document: &Document, listeners: &mut Vec<EventListener>) {
    let items: Vec<AccordionItem<WebNode>> = query_all_in_document(document, "[data-accordion]")
        .into_iter()
        .filter_map(|trigger| {
            let key = trigger.get_attribute("data-accordion")?;
            let panel = document.get_element_by_id(&panel_id(&key))?;
            Some(AccordionItem {
                key,
                trigger: WebNode(trigger),
                panel: WebNode(panel),
            })
        })
        .collect();
    if items.is_empty() {
        return;
    }

    let hash = window.location().hash().unwrap_or_default();
    let accordion = Rc::new(Accordion::mount(items, &hash));

    for (index, item) in accordion.items().iter().enumerate() {
        let accordion = Rc::clone(&accordion);
        listeners.push(active_listener(item.trigger.element(), "click", move |event| {
            event.prevent_default();
            accordion.toggle(index);
        }));
    }

    let location = window.location();
    listeners.push(EventListener::new(window, "hashchange", move |_| {
        let hash = location.hash().unwrap_or_default();
        accordion.open_for_hash(&hash);
    }));
}

// ============================================================================
// Contact form
// ============================================================================

/// The mounted form plus its pending submit timer.
///
/// The timer callback only holds a weak reference back, so dropping the
/// runtime drops the timer, which clears it.
struct FormRuntime {
    form: RefCell<ContactForm<WebNode>>,
    pending: RefCell<Option<Timeout>>,
    delay_ms: u32,
    acknowledgment: String,
}

impl FormRuntime {
    fn schedule_finish(self: &Rc<Self>, ticket: SubmitTicket) {
        let runtime = Rc::downgrade(self);
        let timeout = Timeout::new(self.delay_ms, move || {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            if !runtime.form.try_borrow().is_ok_and(|form| form.is_pending(ticket)) {
                return;
            }
            gloo::dialogs::alert(&runtime.acknowledgment);
            match runtime.form.try_borrow_mut() {
                Ok(mut form) => {
                    form.finish_submit(ticket);
                }
                Err(_) => tracing::warn!(?ticket, "contact form busy, submit not finished"),
            }
        });
        *self.pending.borrow_mut() = Some(timeout);
    }

    fn cancel(&self) {
        self.pending.borrow_mut().take();
        if let Ok(mut form) = self.form.try_borrow_mut() {
            form.cancel_submit();
        }
    }
}

fn error_slot(anchor: &WebNode) -> Option<WebNode> {
    let container = anchor.element().closest(".contact__field").ok().flatten()?;
    query_in(&container, ".contact__error")
}

fn bind_fields(form: &Element) -> Vec<FieldBinding<WebNode>> {
    let mut fields = Vec::new();
    for field in FieldId::ALL {
        let control = match field {
            FieldId::Name | FieldId::Tel | FieldId::Email => {
                query_in(form, &format!("#{}", field.as_str())).map(FieldControl::Text)
            }
            FieldId::ContactMethod => {
                let options: Vec<WebNode> =
                    query_all_in(form, &format!("[name=\"{}\"]", field.as_str()))
                        .into_iter()
                        .map(WebNode)
                        .collect();
                (!options.is_empty()).then_some(FieldControl::RadioGroup(options))
            }
            FieldId::Privacy => {
                query_in(form, &format!("[name=\"{}\"]", field.as_str())).map(FieldControl::Checkbox)
            }
        };
        let Some(control) = control else {
            continue;
        };
        let error_slot = control.anchor().and_then(error_slot);
        fields.push(FieldBinding {
            field,
            control,
            error_slot,
        });
    }
    fields
}

fn mount_form(
    window: &Window,
    document: &Document,
    settings: &FormSettings,
    listeners: &mut Vec<EventListener>,
) -> Option<Rc<FormRuntime>> {
    let form_el = document.get_element_by_id("contact-form")?;
    let fields = bind_fields(&form_el);
    let parts = FormParts {
        form: WebNode(form_el.clone()),
        submit: query_in(&form_el, "button[type=\"submit\"]"),
        fields: fields.clone(),
    };
    let runtime = Rc::new(FormRuntime {
        form: RefCell::new(ContactForm::mount(parts, settings)),
        pending: RefCell::new(None),
        delay_ms: settings.submit_delay_ms,
        acknowledgment: settings.acknowledgment.clone(),
    });

    for binding in &fields {
        let field = binding.field;
        let (targets, event_type): (Vec<&WebNode>, &'static str) = match &binding.control {
            FieldControl::Text(node) => (vec![node], "blur"),
            FieldControl::Checkbox(node) => (vec![node], "change"),
            FieldControl::RadioGroup(options) => (options.iter().collect(), "change"),
        };
        for target in targets {
            let runtime = Rc::clone(&runtime);
            // Skipped when a handler further up the stack holds the form.
            listeners.push(EventListener::new(target.element(), event_type, move |_| {
                if let Ok(mut form) = runtime.form.try_borrow_mut() {
                    form.validate_field(field);
                }
            }));
        }
    }

    let rt = Rc::clone(&runtime);
    listeners.push(active_listener(&form_el, "submit", move |event| {
        event.prevent_default();
        if let SubmitOutcome::Accepted(ticket) = submit_shared(&rt.form) {
            rt.schedule_finish(ticket);
        }
    }));

    let rt = Rc::clone(&runtime);
    listeners.push(EventListener::new(window, "pagehide", move |_| {
        rt.cancel();
    }));

    Some(runtime)
}
