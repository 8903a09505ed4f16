//! Editor display slots a preview can be shown in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three editor columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySlot {
    One,
    Two,
    Three,
}

impl DisplaySlot {
    /// Slot to open a preview in when the caller did not choose one.
    ///
    /// Rotates away from the active slot: One → Two → Three → One. Without an
    /// active slot the preview goes to One.
    pub fn next_after(active: Option<DisplaySlot>) -> DisplaySlot {
        match active {
            Some(DisplaySlot::One) => DisplaySlot::Two,
            Some(DisplaySlot::Two) => DisplaySlot::Three,
            Some(DisplaySlot::Three) | None => DisplaySlot::One,
        }
    }

    /// 1-based column number.
    pub fn column(self) -> u8 {
        match self {
            DisplaySlot::One => 1,
            DisplaySlot::Two => 2,
            DisplaySlot::Three => 3,
        }
    }
}

impl fmt::Display for DisplaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.column())
    }
}
