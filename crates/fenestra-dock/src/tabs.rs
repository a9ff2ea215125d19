//! Tab strip: the ordered collection of content tabs owned by one leaf.

use crate::content::{ContentHandle, ContentId};

/// A selectable content handle inside a tab strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    /// Display label, taken from the content prototype's title.
    pub label: String,
    pub content: ContentHandle,
}

impl Tab {
    pub fn new(label: impl Into<String>, content: ContentHandle) -> Self {
        Self {
            label: label.into(),
            content,
        }
    }
}

/// Ordered tabs plus the single active selection.
///
/// `active` is `None` only while the strip is empty; an empty strip is the
/// signal for the owning leaf to be collapsed away.
#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    /// Append a tab without changing the selection.
    ///
    /// Returns the index it landed at. The first tab of an empty strip
    /// becomes active.
    pub fn push(&mut self, tab: Tab) -> usize {
        self.tabs.push(tab);
        if self.active.is_none() {
            self.active = Some(0);
        }
        self.tabs.len() - 1
    }

    /// Insert a tab at `index` (clamped), keeping the same tab active.
    pub fn insert(&mut self, index: usize, tab: Tab) -> usize {
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, tab);

        match self.active {
            None => self.active = Some(0),
            Some(active) if index <= active && active + 1 < self.tabs.len() => {
                self.active = Some(active + 1);
            }
            Some(_) => {}
        }

        index
    }

    /// Remove the tab at `index`, keeping a valid selection.
    pub fn remove(&mut self, index: usize) -> Option<Tab> {
        if index >= self.tabs.len() {
            return None;
        }

        let tab = self.tabs.remove(index);

        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active >= self.tabs.len() => Some(self.tabs.len() - 1),
            other => other,
        };

        Some(tab)
    }

    /// Remove a tab by its content id.
    ///
    /// Returns the tab and whether it was the active one.
    pub fn remove_content(&mut self, content: ContentId) -> Option<(Tab, bool)> {
        let index = self.position_of(content)?;
        let was_active = self.active == Some(index);
        self.remove(index).map(|tab| (tab, was_active))
    }

    /// Index of the tab holding `content`.
    pub fn position_of(&self, content: ContentId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.content.id == content)
    }

    /// Select the tab at `index`. Returns false if the index is invalid.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    /// Select the tab holding `content`.
    pub fn select_content(&mut self, content: ContentId) -> bool {
        match self.position_of(content) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Drain every tab, leaving the strip empty.
    pub fn take_all(&mut self) -> Vec<Tab> {
        self.active = None;
        std::mem::take(&mut self.tabs)
    }
}
