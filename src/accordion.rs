//! FAQ accordion.
//!
//! A trigger carries `data-accordion="<key>"`; its panel is the element with
//! id `<key>-answer`. The open/closed state lives in the markup itself:
//! `aria-expanded` on the trigger and `aria-hidden` on the panel. Triggers
//! whose panel is missing are never mounted.
//!
//! Visiting `#<key>` (on load or on `hashchange`) opens the matching item.

use crate::dom::{Node, ScrollBlock};

/// Id of the panel paired with a trigger key.
pub fn panel_id(key: &str) -> String {
    format!("{key}-answer")
}

/// One question/answer pair.
#[derive(Debug, Clone)]
pub struct AccordionItem<N> {
    pub key: String,
    pub trigger: N,
    pub panel: N,
}

impl<N: Node> AccordionItem<N> {
    pub fn is_expanded(&self) -> bool {
        self.trigger.attribute("aria-expanded").as_deref() == Some("true")
    }

    pub fn open(&self) {
        self.trigger.set_attribute("aria-expanded", "true");
        self.panel.set_attribute("aria-hidden", "false");
        self.trigger.scroll_into_view(ScrollBlock::Nearest);
    }

    pub fn close(&self) {
        self.trigger.set_attribute("aria-expanded", "false");
        self.panel.set_attribute("aria-hidden", "true");
    }

    /// Flip the item. Returns whether it is now expanded.
    pub fn toggle(&self) -> bool {
        if self.is_expanded() {
            self.close();
            false
        } else {
            self.open();
            true
        }
    }

    /// Whether `hash` (as in `location.hash`, with the `#`) targets this item.
    pub fn matches_hash(&self, hash: &str) -> bool {
        hash.strip_prefix('#') == Some(self.key.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Accordion<N> {
    items: Vec<AccordionItem<N>>,
}

impl<N: Node> Accordion<N> {
    /// Mount the items and open whichever one the current hash targets.
    pub fn mount(items: Vec<AccordionItem<N>>, hash: &str) -> Self {
        let accordion = Self { items };
        accordion.open_for_hash(hash);
        accordion
    }

    pub fn items(&self) -> &[AccordionItem<N>] {
        &self.items
    }

    /// Toggle the item at `index`. `None` if there is no such item.
    pub fn toggle(&self, index: usize) -> Option<bool> {
        self.items.get(index).map(AccordionItem::toggle)
    }

    /// Open every item the hash targets. Returns how many matched.
    ///
    /// Items already open stay open; nothing is closed.
    pub fn open_for_hash(&self, hash: &str) -> usize {
        let mut opened = 0;
        for item in self.items.iter().filter(|i| i.matches_hash(hash)) {
            item.open();
            opened += 1;
        }
        opened
    }
}
