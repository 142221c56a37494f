//! Citation disclosure state
//!
//! Tracks which single turn, if any, has its citation list expanded. The
//! selector is keyed by turn position and is not cleared when turns are added.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisclosureState {
    selected: Option<usize>,
}

impl DisclosureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `index`, or close it if it is already the open one
    pub fn toggle(&mut self, index: usize) {
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    #[allow(dead_code)] // API completeness
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}
