use serde::{Deserialize, Serialize};

use crate::NONE_OF_THESE;

/// The chosen options of a multi-select question.
///
/// Options keep the order in which they were selected. The sentinel
/// option [`NONE_OF_THESE`] never coexists with any other option: selecting
/// it clears the rest, and selecting anything else drops it. The rule is
/// applied on every single change, so a `Selection` is always consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    options: Vec<String>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an option, applying the sentinel rule.
    ///
    /// Selecting an option that is already selected changes nothing.
    pub fn select(&mut self, option: impl Into<String>) {
        let option = option.into();
        if self.contains(&option) {
            return;
        }
        if option == NONE_OF_THESE {
            self.options.clear();
        } else {
            self.options.retain(|o| o != NONE_OF_THESE);
        }
        self.options.push(option);
    }

    /// Deselect an option. Returns whether it was selected.
    pub fn deselect(&mut self, option: &str) -> bool {
        let before = self.options.len();
        self.options.retain(|o| o != option);
        self.options.len() != before
    }

    /// Flip an option. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, option: impl Into<String>) -> bool {
        let option = option.into();
        if self.deselect(&option) {
            false
        } else {
            self.select(option);
            true
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    /// The selected options in selection order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    /// Builds a selection by selecting each item in turn, so the sentinel
    /// rule holds for the result.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for option in iter {
            selection.select(option);
        }
        selection
    }
}
