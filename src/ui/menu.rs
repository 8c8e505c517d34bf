//! Menu model: an ordered list of labelled entries with a cursor.
//!
//! A menu owns its entries' payloads. It is built fresh for every
//! activation of a screen and consumed when the user picks an entry, so
//! every payload is dropped exactly once whichever way the screen exits.

use heapless::{String, Vec};

use crate::config::{MAX_MENU_ITEMS, MENU_LABEL_MAX_LEN};
use crate::ui::input_logic::{select_next, select_prev};
use crate::ui::text::copy_truncated;

/// Menu entry label.
pub type Label = String<MENU_LABEL_MAX_LEN>;

/// A single menu entry.
#[derive(Debug)]
pub struct MenuItem<A> {
    pub label: Label,
    pub action: A,
}

/// A titled list of entries with a selection cursor.
#[derive(Debug)]
pub struct Menu<A> {
    title: Label,
    items: Vec<MenuItem<A>, MAX_MENU_ITEMS>,
    position: usize,
}

impl<A> Menu<A> {
    /// Create an empty menu.
    pub fn new(title: &str) -> Self {
        let mut t = Label::new();
        copy_truncated(title, &mut t);
        Self {
            title: t,
            items: Vec::new(),
            position: 0,
        }
    }

    /// Append an entry. Labels are truncated to [`MENU_LABEL_MAX_LEN`].
    ///
    /// Returns the action back if the menu is full.
    pub fn push(&mut self, label: &str, action: A) -> Result<(), A> {
        let mut l = Label::new();
        copy_truncated(label, &mut l);
        self.items
            .push(MenuItem { label: l, action })
            .map_err(|item| item.action)
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn items(&self) -> &[MenuItem<A>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the selected entry.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor down. Returns `true` if it moved.
    pub fn navigate_next(&mut self) -> bool {
        let next = select_next(self.position, self.items.len());
        let moved = next != self.position;
        self.position = next;
        moved
    }

    /// Move the cursor up. Returns `true` if it moved.
    pub fn navigate_previous(&mut self) -> bool {
        let prev = select_prev(self.position);
        let moved = prev != self.position;
        self.position = prev;
        moved
    }

    /// The entry under the cursor.
    pub fn selected(&self) -> Option<&MenuItem<A>> {
        self.items.get(self.position)
    }

    /// Consume the menu, keeping only the selected entry's action.
    ///
    /// All other entries are dropped here.
    pub fn into_selected(mut self) -> Option<A> {
        if self.position < self.items.len() {
            Some(self.items.swap_remove(self.position).action)
        } else {
            None
        }
    }
}
