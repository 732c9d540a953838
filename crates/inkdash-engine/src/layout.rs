//! Column layout for the day panels on a 12-unit grid.

use serde::Serialize;

use crate::error::{EngineError, Result};

/// Widths and visibility of the today / tomorrow / day-after columns.
///
/// The day-after column takes whatever width remains in the grid row and has
/// no width of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub today_width: u8,
    /// Still set when the column is hidden; the template expects a value.
    pub tomorrow_width: u8,
    pub tomorrow_visible: bool,
    pub day_after_visible: bool,
}

impl Layout {
    /// CSS class for the tomorrow column.
    pub fn tomorrow_class(&self) -> &'static str {
        visibility_class(self.tomorrow_visible)
    }

    /// CSS class for the day-after column.
    pub fn day_after_class(&self) -> &'static str {
        visibility_class(self.day_after_visible)
    }
}

/// The template hides a column with `hidden` and shows it with no class.
fn visibility_class(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "hidden"
    }
}

/// Pick the layout for 1, 2 or 3 displayed days.
///
/// # Errors
/// Any other count is a configuration error (`EngineError::InvalidLayout`).
pub fn select_layout(num_display_days: usize) -> Result<Layout> {
    let (today_width, tomorrow_width, tomorrow_visible, day_after_visible) =
        match num_display_days {
            1 => (12, 6, false, false),
            2 => (6, 6, true, false),
            3 => (4, 4, true, true),
            other => return Err(EngineError::InvalidLayout(other)),
        };

    Ok(Layout {
        today_width,
        tomorrow_width,
        tomorrow_visible,
        day_after_visible,
    })
}
