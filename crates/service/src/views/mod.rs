//! Presentation view models: what the list renderers and cards display.
//! Built from records, never sent back to the backend.

pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod jobs;
pub mod requests;

use serde::Serialize;

/// A rendered list plus the message to show when it has no items.
#[derive(Debug, Clone, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl<T> ListView<T> {
    pub fn new(items: Vec<T>, empty_message: &'static str) -> Self {
        let empty_message = if items.is_empty() { Some(empty_message) } else { None };
        Self { items, empty_message }
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// A selectable value and its display label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}
