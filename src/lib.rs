//! # Renovation LP
//!
//! The interactive parts of a renovation company's landing page, plus the
//! static generator that renders the page they run on.
//!
//! ```text
//! site/config.toml  →  renovation-lp build  →  dist/index.html
//!                                               dist/assets/…
//! wasm-pack build --target web --out-dir dist/pkg  →  dist/pkg/…
//! ```
//!
//! The page works without the wasm runtime: images, FAQ text, and the form
//! are plain markup. The runtime layers behavior on top of the classes and
//! attributes the generator emits.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | The [`dom::Node`] trait the widget controllers drive |
//! | [`slider`] | Before/after comparison slider: position, drag, keyboard |
//! | [`cases`] | Case thumbnails that swap the slider's image pair |
//! | [`accordion`] | FAQ accordion with `#hash` deep links |
//! | [`rules`] | Contact form field rules and the validation engine |
//! | [`form`] | Contact form controller: inline errors, focus, cancellable submit |
//! | [`settings`] | Runtime knobs embedded in the page as JSON |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Page rendering with Maud, asset copying, asset checks |
//! | [`output`] | CLI output formatting |
//! | `web` | wasm32 only: binds the controllers to the live document |
//!
//! # Design Decisions
//!
//! ## Controllers Over a Node Trait
//!
//! Every widget is written against [`dom::Node`] instead of `web_sys`
//! directly. In the browser the nodes are real elements; in tests they are
//! in-memory records, so slider math, validation, and the submit lifecycle
//! are unit tested on the host without a browser.
//!
//! ## State Lives in the Markup
//!
//! The accordion's open state is `aria-expanded`/`aria-hidden`, a field's
//! validity is `aria-invalid`, the slider position is the range input's
//! value. Styles key off the same attributes, so there is one source of
//! truth and assistive tech sees exactly what the page shows.
//!
//! ## Submit Is a Ticket
//!
//! Submitting issues a [`form::SubmitTicket`]. Only the matching ticket can
//! complete the submit, so a timer that fires after the form was torn down
//! or resubmitted is a no-op.

pub mod accordion;
pub mod cases;
pub mod config;
pub mod dom;
pub mod form;
pub mod generate;
pub mod output;
pub mod rules;
pub mod settings;
pub mod slider;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
