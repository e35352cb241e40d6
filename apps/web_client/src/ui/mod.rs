//! UI layer: the page view model and the format list it displays.

pub mod format_list;
pub mod page;

pub use format_list::FormatEntry;
pub use page::{PageView, Preview};
