//! Contact form controller.
//!
//! Binds the [`RuleSet`] to the form's elements and keeps their error state
//! in sync with the last validation of each field:
//!
//! - text fields validate on `blur`, the checkbox and radio group on
//!   `change`; nothing validates per keystroke
//! - a failed validation sets `aria-invalid="true"` on the field and writes
//!   the rule's message into the field's error slot; a passing one sets
//!   `aria-invalid="false"` and empties the slot
//! - a field without an error slot (or without a `.contact__field`
//!   container to find one in) still tracks `aria-invalid`, the message is
//!   just not shown
//!
//! ## Submit lifecycle
//!
//! ```text
//!            submit (invalid)
//!          ┌──────────────────┐
//!          ▼                  │
//!        Idle ──────────────────► Submitting(ticket) ──finish(ticket)──► Idle
//!          ▲   submit (valid)          │                 (reset form)
//!          └───────── cancel ──────────┘
//! ```
//!
//! A rejected submit names the first invalid field; [`submit_shared`] moves
//! focus there once the form is no longer borrowed, because focusing fires
//! `blur` on the previously focused field and its listener validates again.
//!
//! Submitting disables the button and swaps its label for the busy label.
//! The runtime schedules [`ContactForm::finish_submit`] after the configured
//! delay. Each accepted submit gets a fresh [`SubmitTicket`]; finishing with
//! a ticket that is no longer the pending one does nothing, so a timer that
//! outlives a cancel cannot reset the form.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::dom::{Node, ScrollBlock};
use crate::rules::{FieldId, FieldValue, RuleSet, ValidationReport, Verdict};
use crate::settings::FormSettings;

/// How a field's value is read from the page.
#[derive(Debug, Clone)]
pub enum FieldControl<N> {
    Text(N),
    Checkbox(N),
    /// Every option of one radio group, in document order.
    RadioGroup(Vec<N>),
}

impl<N: Node> FieldControl<N> {
    pub fn read(&self) -> FieldValue {
        match self {
            FieldControl::Text(node) => FieldValue::Text(node.value()),
            FieldControl::Checkbox(node) => FieldValue::Checked(node.is_checked()),
            FieldControl::RadioGroup(options) => {
                let mut checked = options.iter().filter(|o| o.is_checked());
                match (checked.next(), checked.next()) {
                    (Some(only), None) => FieldValue::Choice(Some(only.value())),
                    _ => FieldValue::Choice(None),
                }
            }
        }
    }

    /// The element that carries `aria-invalid` and receives focus.
    ///
    /// For a radio group that is its first option.
    pub fn anchor(&self) -> Option<&N> {
        match self {
            FieldControl::Text(node) | FieldControl::Checkbox(node) => Some(node),
            FieldControl::RadioGroup(options) => options.first(),
        }
    }
}

/// One field's elements.
#[derive(Debug, Clone)]
pub struct FieldBinding<N> {
    pub field: FieldId,
    pub control: FieldControl<N>,
    pub error_slot: Option<N>,
}

/// The elements the controller is mounted on.
#[derive(Debug, Clone)]
pub struct FormParts<N> {
    pub form: N,
    pub submit: Option<N>,
    pub fields: Vec<FieldBinding<N>>,
}

/// The last validation result of each field.
///
/// A field's error indicator is shown iff its entry is `Some(false)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    last: BTreeMap<FieldId, bool>,
}

impl FormState {
    pub fn record(&mut self, field: FieldId, valid: bool) {
        self.last.insert(field, valid);
    }

    pub fn last(&self, field: FieldId) -> Option<bool> {
        self.last.get(&field).copied()
    }

    pub fn shows_error(&self, field: FieldId) -> bool {
        self.last(field) == Some(false)
    }

    /// True only when every field has been validated and passed.
    pub fn is_valid(&self) -> bool {
        FieldId::ALL.iter().all(|f| self.last(*f) == Some(true))
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }
}

/// Identifies one accepted submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting(SubmitTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed. `first_invalid` is the first bound field,
    /// in declaration order, now marked invalid.
    Rejected {
        invalid: Vec<FieldId>,
        first_invalid: Option<FieldId>,
    },
    /// Every field passed. Finish the submit with this ticket after the delay.
    Accepted(SubmitTicket),
    /// A submit is already pending.
    Ignored,
}

/// The mounted contact form.
#[derive(Debug)]
pub struct ContactForm<N: Node> {
    parts: FormParts<N>,
    rules: RuleSet,
    busy_label: String,
    state: FormState,
    phase: SubmitPhase,
    issued: u64,
    idle_label: Option<String>,
}

impl<N: Node> ContactForm<N> {
    pub fn mount(parts: FormParts<N>, settings: &FormSettings) -> Self {
        Self {
            parts,
            rules: RuleSet::standard(&settings.messages),
            busy_label: settings.busy_label.clone(),
            state: FormState::default(),
            phase: SubmitPhase::Idle,
            issued: 0,
            idle_label: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Validate one field and render its error state.
    ///
    /// Called on `blur` for text fields and on `change` for the checkbox and
    /// radio group. A field with no bound elements is treated as valid.
    pub fn validate_field(&mut self, field: FieldId) -> bool {
        let Some(value) = self.binding(field).map(|b| b.control.read()) else {
            return true;
        };
        let verdict = self.rules.validate_one(field, &value);
        self.render(&verdict);
        verdict.valid
    }

    /// Validate and render every field, without stopping at the first failure.
    pub fn validate_all(&mut self) -> ValidationReport {
        let report = {
            let parts = &self.parts;
            self.rules
                .validate_all(|field| read_field(parts, field))
        };
        for verdict in &report.verdicts {
            self.render(verdict);
        }
        report
    }

    /// Handle the form's `submit` event.
    pub fn submit(&mut self) -> SubmitOutcome {
        if matches!(self.phase, SubmitPhase::Submitting(_)) {
            return SubmitOutcome::Ignored;
        }

        let report = self.validate_all();
        if !report.is_valid() {
            tracing::debug!(invalid = ?report.invalid_fields(), "contact form rejected");
            return SubmitOutcome::Rejected {
                invalid: report.invalid_fields(),
                first_invalid: self.first_error(),
            };
        }

        tracing::info!("contact form validated successfully");
        if let Some(button) = &self.parts.submit {
            self.idle_label = Some(button.text());
            button.set_text(&self.busy_label);
            button.set_disabled(true);
        }
        self.issued += 1;
        let ticket = SubmitTicket(self.issued);
        self.phase = SubmitPhase::Submitting(ticket);
        SubmitOutcome::Accepted(ticket)
    }

    /// Whether `ticket` is the submit still waiting to finish.
    pub fn is_pending(&self, ticket: SubmitTicket) -> bool {
        self.phase == SubmitPhase::Submitting(ticket)
    }

    /// Complete a pending submit: reset the form, restore the button, and
    /// clear every error indicator. Stale tickets are ignored.
    pub fn finish_submit(&mut self, ticket: SubmitTicket) -> bool {
        if !self.is_pending(ticket) {
            tracing::debug!(?ticket, "ignoring stale submit completion");
            return false;
        }
        self.parts.form.reset();
        self.restore_button();
        self.clear_errors();
        self.phase = SubmitPhase::Idle;
        true
    }

    /// Abandon a pending submit without resetting the form.
    pub fn cancel_submit(&mut self) {
        if let SubmitPhase::Submitting(ticket) = self.phase {
            tracing::debug!(?ticket, "submit cancelled");
            self.restore_button();
            self.phase = SubmitPhase::Idle;
        }
    }

    pub fn clear_errors(&mut self) {
        for binding in &self.parts.fields {
            if let Some(anchor) = binding.control.anchor() {
                anchor.set_attribute("aria-invalid", "false");
            }
            if let Some(slot) = &binding.error_slot {
                slot.set_text("");
            }
        }
        self.state.clear();
    }

    fn binding(&self, field: FieldId) -> Option<&FieldBinding<N>> {
        self.parts.fields.iter().find(|b| b.field == field)
    }

    fn render(&mut self, verdict: &Verdict) {
        self.state.record(verdict.field, verdict.valid);
        let Some(binding) = self.binding(verdict.field) else {
            return;
        };
        if let Some(anchor) = binding.control.anchor() {
            anchor.set_attribute("aria-invalid", if verdict.valid { "false" } else { "true" });
        }
        if let Some(slot) = &binding.error_slot {
            slot.set_text(verdict.message.as_deref().unwrap_or(""));
        }
    }

    /// The node that takes focus for `field`: the input, or a radio group's
    /// first option.
    pub fn anchor(&self, field: FieldId) -> Option<N> {
        self.binding(field)?.control.anchor().cloned()
    }

    /// The first field, in declaration order, currently marked invalid.
    fn first_error(&self) -> Option<FieldId> {
        FieldId::ALL.into_iter().find(|field| {
            self.anchor(*field)
                .and_then(|anchor| anchor.attribute("aria-invalid"))
                .as_deref()
                == Some("true")
        })
    }

    fn restore_button(&mut self) {
        if let Some(button) = &self.parts.submit {
            if let Some(label) = self.idle_label.take() {
                button.set_text(&label);
            }
            button.set_disabled(false);
        }
    }
}

/// Submit a form that event listeners also borrow.
///
/// The form is borrowed only while validating. A rejected submit then
/// focuses and scrolls to the first invalid field with the borrow released,
/// so listeners fired by the focus change can borrow the form themselves.
pub fn submit_shared<N: Node>(form: &RefCell<ContactForm<N>>) -> SubmitOutcome {
    let outcome = form.borrow_mut().submit();
    if let SubmitOutcome::Rejected {
        first_invalid: Some(field),
        ..
    } = &outcome
    {
        let anchor = form.borrow().anchor(*field);
        if let Some(anchor) = anchor {
            anchor.focus();
            anchor.scroll_into_view(ScrollBlock::Center);
        }
    }
    outcome
}

/// Read a field, treating missing elements as an empty value.
fn read_field<N: Node>(parts: &FormParts<N>, field: FieldId) -> FieldValue {
    match parts.fields.iter().find(|b| b.field == field) {
        Some(binding) => binding.control.read(),
        None => match field {
            FieldId::ContactMethod => FieldValue::Choice(None),
            FieldId::Privacy => FieldValue::Checked(false),
            FieldId::Name | FieldId::Tel | FieldId::Email => FieldValue::Text(String::new()),
        },
    }
}
