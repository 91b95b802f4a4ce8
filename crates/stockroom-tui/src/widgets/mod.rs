//! Reusable widgets.

pub mod item_form;
