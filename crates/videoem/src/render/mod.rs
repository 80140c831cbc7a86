mod card;
mod dom;
mod preview;
mod table;
mod time;

pub use card::VideoCardBuilder;
pub use dom::{Document, Element, ElementRef};
pub use preview::{ClickOutcome, PreviewBoard, PreviewId};
pub use table::append_cards;
pub use time::format_db_time;
