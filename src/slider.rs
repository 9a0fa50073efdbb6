//! Before/after comparison slider.
//!
//! A comparison widget stacks the "before" image over the "after" image and
//! reveals part of it. Its whole state is one integer position in `0..=100`:
//!
//! ```text
//!  0%            position            100%
//!  ├────────────────┼──────────────────┤
//!  │   before       ║      after       │
//!  └────────────────╨──────────────────┘
//!                 handle
//! ```
//!
//! Rendering a position writes exactly two style properties:
//!
//! - `clip-path: inset(0 R% 0 0)` on the before image, with `R = 100 - position`
//! - `left: position%` on the drag handle
//!
//! Input arrives three ways: the range input's own value, pointer/touch
//! drags over the container, and arrow keys on the range input. All of them
//! end in the same render step, so the two properties can never disagree.
//!
//! ## Dragging
//!
//! Move and end events are listened for on the document, so every widget on
//! the page sees every move. Each [`Slider`] owns its own `dragging` flag and
//! [`Slider::drag_to`] is a no-op unless that flag is set, which keeps
//! widgets from moving each other.

use crate::dom::{Bounds, Node};
use crate::settings::SliderSettings;

pub const POSITION_MIN: u8 = 0;
pub const POSITION_MAX: u8 = 100;
/// Position a widget returns to when its image pair is switched.
pub const RESET_POSITION: u8 = 50;

/// Reveal position of one comparison widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    position: u8,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            position: RESET_POSITION,
        }
    }
}

impl SliderState {
    /// Build a state, clamping anything above the maximum.
    pub fn new(position: u8) -> Self {
        Self {
            position: position.min(POSITION_MAX),
        }
    }

    /// Round a fractional percentage to the nearest position and clamp it.
    ///
    /// Returns `None` for NaN or infinities.
    pub fn from_percentage(percentage: f64) -> Option<Self> {
        if !percentage.is_finite() {
            return None;
        }
        let clamped = percentage
            .round()
            .clamp(f64::from(POSITION_MIN), f64::from(POSITION_MAX));
        Some(Self {
            position: clamped as u8,
        })
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// How much of the before image is clipped from the right edge, in percent.
    pub fn clip_inset(&self) -> u8 {
        POSITION_MAX - self.position
    }

    /// Horizontal offset of the handle from the left edge, in percent.
    pub fn handle_offset(&self) -> u8 {
        self.position
    }

    pub fn clip_path(&self) -> String {
        format!("inset(0 {}% 0 0)", self.clip_inset())
    }

    pub fn handle_left(&self) -> String {
        format!("{}%", self.handle_offset())
    }

    /// Move one keyboard step in `direction`, saturating at the bounds.
    pub fn stepped(self, direction: StepDirection, step: u8) -> Self {
        let position = match direction {
            StepDirection::Increase => self.position.saturating_add(step).min(POSITION_MAX),
            StepDirection::Decrease => self.position.saturating_sub(step),
        };
        Self { position }
    }
}

/// Translate a pointer x coordinate into a percentage of the container.
///
/// Coordinates outside the container yield values outside `0..=100`; the
/// caller clamps. A container without width yields `None`.
pub fn pointer_percentage(x: f64, bounds: Bounds) -> Option<f64> {
    if bounds.width <= 0.0 || !bounds.width.is_finite() || !x.is_finite() {
        return None;
    }
    Some((x - bounds.left) / bounds.width * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increase,
    Decrease,
}

impl StepDirection {
    /// Map a `KeyboardEvent.key` value to a step direction.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowUp" => Some(Self::Increase),
            "ArrowLeft" | "ArrowDown" => Some(Self::Decrease),
            _ => None,
        }
    }
}

/// Keyboard step sizes: `step` normally, `fine_step` with Shift held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSteps {
    pub step: u8,
    pub fine_step: u8,
}

impl Default for SliderSteps {
    fn default() -> Self {
        Self {
            step: 5,
            fine_step: 1,
        }
    }
}

impl From<&SliderSettings> for SliderSteps {
    fn from(settings: &SliderSettings) -> Self {
        Self {
            step: settings.step,
            fine_step: settings.fine_step,
        }
    }
}

/// The elements one comparison widget is built from.
///
/// The range input, before image and handle are required to mount a widget.
/// Without a container the widget still works from the range input and the
/// keyboard, it just cannot be dragged.
#[derive(Debug, Clone)]
pub struct SliderParts<N> {
    pub container: Option<N>,
    pub range: N,
    pub before: N,
    pub handle: N,
}

/// One mounted comparison widget.
#[derive(Debug)]
pub struct Slider<N: Node> {
    parts: SliderParts<N>,
    state: SliderState,
    dragging: bool,
    steps: SliderSteps,
}

impl<N: Node> Slider<N> {
    /// Mount a widget and render the position currently held by its range input.
    pub fn mount(parts: SliderParts<N>, steps: SliderSteps) -> Self {
        let state = parse_range_value(&parts.range.value()).unwrap_or_default();
        let slider = Self {
            parts,
            state,
            dragging: false,
            steps,
        };
        slider.render();
        slider
    }

    pub fn state(&self) -> SliderState {
        self.state
    }

    pub fn position(&self) -> u8 {
        self.state.position()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the position, sync the range input, and render both properties.
    pub fn set_position(&mut self, position: u8) {
        self.apply(SliderState::new(position));
    }

    /// Handle an `input` event from the range input.
    ///
    /// The input already holds the new value, so only the styles are
    /// rendered. Unparseable values are ignored.
    pub fn on_input(&mut self, raw: &str) {
        if let Some(state) = parse_range_value(raw) {
            self.state = state;
            self.render();
        }
    }

    /// Start a drag at pointer coordinate `x`.
    ///
    /// Returns `false` when the widget has no container to drag over, in
    /// which case the event should be left alone.
    pub fn begin_drag(&mut self, x: f64) -> bool {
        if self.parts.container.is_none() {
            return false;
        }
        self.dragging = true;
        tracing::trace!(x, "slider drag started");
        self.drag_to(x);
        true
    }

    /// Follow a pointer move. Ignored unless this widget is being dragged.
    pub fn drag_to(&mut self, x: f64) {
        if !self.dragging {
            return;
        }
        let Some(bounds) = self.parts.container.as_ref().and_then(|c| c.bounds()) else {
            return;
        };
        if let Some(state) = pointer_percentage(x, bounds).and_then(SliderState::from_percentage) {
            self.apply(state);
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Handle a `keydown` on the range input.
    ///
    /// Returns `true` when the key moved the slider; the caller then
    /// prevents the browser's own range-input stepping.
    pub fn on_key(&mut self, key: &str, fine: bool) -> bool {
        let Some(direction) = StepDirection::from_key(key) else {
            return false;
        };
        let step = if fine {
            self.steps.fine_step
        } else {
            self.steps.step
        };
        self.apply(self.state.stepped(direction, step));
        true
    }

    /// Return to the middle after the image pair changed.
    pub fn reset(&mut self) {
        self.set_position(RESET_POSITION);
    }

    fn apply(&mut self, state: SliderState) {
        self.state = state;
        self.parts
            .range
            .set_value(&state.position().to_string());
        self.render();
    }

    fn render(&self) {
        self.parts.before.set_style("clip-path", &self.state.clip_path());
        self.parts
            .handle
            .set_style("left", &self.state.handle_left());
    }
}

/// Parse a range input value (`"42"`, `"42.6"`) into a state.
fn parse_range_value(raw: &str) -> Option<SliderState> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(SliderState::from_percentage)
}
