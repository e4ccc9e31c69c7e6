//! Dashboard tab selection.
//!
//! The selected operation comes with an instance key. Views key the form
//! on it, so switching tabs drops the old form (and whatever it had in
//! flight) and mounts a fresh one.

use crate::operations::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardTabs {
    selected: Operation,
    instance: u64,
}

impl Default for DashboardTabs {
    fn default() -> Self {
        Self {
            selected: Operation::ALL[0],
            instance: 0,
        }
    }
}

impl DashboardTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &'static [Operation] {
        &Operation::ALL
    }

    pub fn selected(&self) -> Operation {
        self.selected
    }

    pub fn is_selected(&self, operation: Operation) -> bool {
        self.selected == operation
    }

    /// Key for the mounted form instance
    pub fn instance_key(&self) -> u64 {
        self.instance
    }

    /// Switch tabs. Re-selecting the current tab keeps its form.
    pub fn select(&mut self, operation: Operation) -> bool {
        if self.selected == operation {
            return false;
        }
        self.selected = operation;
        self.instance += 1;
        true
    }
}
