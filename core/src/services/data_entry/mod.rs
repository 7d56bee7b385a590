//! Data entry service: owner-scoped CRUD plus the read-only all-users view

mod service;

#[cfg(test)]
mod tests;

pub use service::{
    max_entry_value, normalize_entry_value, validate_entry_input, DataEntryService, VALUE_SCALE,
};
