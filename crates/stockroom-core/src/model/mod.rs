mod item;
mod item_id;

pub use item::{Item, Page, format_price};
pub use item_id::ItemId;
