// ── Form validation ──
//
// Runs before any create/update request. The first failing rule wins and
// its message is shown verbatim to the user.

use thiserror::Error;

use crate::command::ItemPayload;

/// Longest accepted item name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Client-side validation failure. Never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be 255 characters or less")]
    NameTooLong,

    #[error("Price must be a non-negative number")]
    InvalidPrice,
}

/// Validate raw form input and produce the request payload.
///
/// The payload carries the trimmed name and the parsed price.
pub fn validate(name: &str, price: &str) -> Result<ItemPayload, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    let price = parse_price(price).ok_or(ValidationError::InvalidPrice)?;

    Ok(ItemPayload {
        name: name.to_owned(),
        price,
    })
}

/// Parse a price string: finite and non-negative, or nothing.
fn parse_price(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    // `-0` parses as negative zero, which is still zero.
    (value.is_finite() && value >= 0.0).then_some(value.abs())
}
