//! Case thumbnails: switch the comparison widget between image pairs.
//!
//! Each thumbnail carries its pair and caption as data attributes:
//!
//! ```html
//! <button class="cases__thumb"
//!         data-before="assets/kitchen-before.jpg"
//!         data-after="assets/kitchen-after.jpg"
//!         data-caption="Kitchen, Setagaya">
//! ```
//!
//! Selecting one swaps both image sources, mirrors the pair onto the widget
//! root (so later reads of `data-before` / `data-after` on the root see the
//! pair on screen), updates the caption, and puts the slider back in the
//! middle. Thumbnails missing either image attribute do nothing.

use crate::dom::{Node, ScrollBlock, non_empty_attribute};
use crate::slider::Slider;

pub const ACTIVE_CLASS: &str = "cases__thumb--active";

/// The before/after image sources shown together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub before: String,
    pub after: String,
}

impl ImagePair {
    /// Read `data-before` / `data-after` from an element.
    pub fn from_data<N: Node>(node: &N) -> Option<Self> {
        Some(Self {
            before: non_empty_attribute(node, "data-before")?,
            after: non_empty_attribute(node, "data-after")?,
        })
    }
}

/// The elements the switcher is mounted on: the first comparison widget
/// and every thumbnail on the page.
#[derive(Debug, Clone)]
pub struct CaseParts<N> {
    pub root: N,
    pub before: N,
    pub after: N,
    pub caption: Option<N>,
    pub thumbs: Vec<N>,
}

#[derive(Debug)]
pub struct CaseSwitcher<N> {
    parts: CaseParts<N>,
    current: Option<ImagePair>,
    active: Option<usize>,
}

impl<N: Node> CaseSwitcher<N> {
    /// Mount and mark the first thumbnail active.
    pub fn mount(parts: CaseParts<N>) -> Self {
        let current = ImagePair::from_data(&parts.root);
        let active = parts.thumbs.first().map(|first| {
            first.add_class(ACTIVE_CLASS);
            0
        });
        Self {
            parts,
            current,
            active,
        }
    }

    /// The pair currently on screen, as mirrored on the widget root.
    pub fn current(&self) -> Option<&ImagePair> {
        self.current.as_ref()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn thumb_count(&self) -> usize {
        self.parts.thumbs.len()
    }

    /// Switch to the thumbnail at `index`, resetting `slider` if given.
    ///
    /// Returns `false` (and changes nothing) when the thumbnail does not
    /// exist or lacks an image pair.
    pub fn select(&mut self, index: usize, slider: Option<&mut Slider<N>>) -> bool {
        let Some(thumb) = self.parts.thumbs.get(index) else {
            return false;
        };
        let Some(pair) = ImagePair::from_data(thumb) else {
            tracing::debug!(index, "thumbnail without image pair ignored");
            return false;
        };

        self.parts.before.set_attribute("src", &pair.before);
        self.parts.after.set_attribute("src", &pair.after);
        self.parts.root.set_attribute("data-before", &pair.before);
        self.parts.root.set_attribute("data-after", &pair.after);

        if let (Some(caption), Some(text)) = (
            &self.parts.caption,
            non_empty_attribute(thumb, "data-caption"),
        ) {
            caption.set_text(&text);
        }

        if let Some(slider) = slider {
            slider.reset();
        }

        for other in &self.parts.thumbs {
            other.remove_class(ACTIVE_CLASS);
        }
        thumb.add_class(ACTIVE_CLASS);
        self.parts.root.scroll_into_view(ScrollBlock::Nearest);

        self.current = Some(pair);
        self.active = Some(index);
        true
    }
}
