//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Column accents follow the board's visual language:
// pending red, in-progress blue, completed green.

/// Pending column.
pub const PENDING_RED: Color = Color::Rgb(178, 34, 34);
/// In-progress column.
pub const PROGRESS_BLUE: Color = Color::Rgb(37, 99, 235);
/// Completed column.
pub const COMPLETED_GREEN: Color = Color::Rgb(22, 140, 77);
/// High-priority marker on cards.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
