//! Text Layout
//!
//! Orders OCR text blocks the way a sighted reader would scan them:
//! blocks on the same visual line are merged left to right, lines are
//! read top to bottom.

mod command;
mod cursor;
mod layout;

pub use command::ReadingCommand;
pub use cursor::ReadingCursor;
pub use layout::{join_text, order_blocks, LayoutConfig, Rect, TextBlock};
