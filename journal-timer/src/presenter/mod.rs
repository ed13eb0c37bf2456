//! Keeps form state in step with the models: every model change made from a key press is
//! written back to the control it came from.

mod login;
mod timer;

use std::time::Duration;

pub use login::LoginView;
pub use timer::{ManualField, TimerView};

/// `HH:MM:SS`, hours widening past two digits.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (minutes, seconds) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Text typed into a manual duration field. Empty means zero; anything that is not a whole
/// non-negative number is refused.
pub fn parse_manual_field(text: &str) -> Option<u64> {
    if text.is_empty() {
        return Some(0);
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Option list with a current index, the terminal counterpart of a combo box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectList {
    items: Vec<String>,
    current: usize,
}

impl SelectList {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current = 0;
    }

    pub fn add_items(&mut self, items: &[String]) {
        self.items.extend_from_slice(items);
    }

    /// Out-of-range indices are ignored.
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.items.len() {
            self.current = index;
        }
    }

    pub fn next_index(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.current + 1) % self.items.len()
    }

    pub fn previous_index(&self) -> usize {
        match self.items.len() {
            0 => 0,
            len => (self.current + len - 1) % len,
        }
    }
}
