use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ItemId;

/// A managed inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Price as shown to users: dollar sign, two decimals.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// One fetched slice of the item list. Replaced wholesale on every
/// successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Item>,
    pub total: u64,
    pub offset: u64,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_render_with_two_decimals() {
        assert_eq!(format_price(9.99), "$9.99");
        assert_eq!(format_price(10.0), "$10.00");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(1234.5), "$1234.50");
    }
}
