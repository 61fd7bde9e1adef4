//! Business-ops layer for the landscaping app.
//! - `client`: the seam to the hosted data/auth/file backend (HTTP or in-memory).
//! - `pages`: page containers that load, derive and reload view models.
//! - `drafts`: dialog form state and its commit rules.
//! - `views`, `layout`, `routing`, `content`: what gets rendered around the data.

pub mod client;
pub mod content;
pub mod drafts;
pub mod errors;
pub mod layout;
pub mod metrics;
pub mod pages;
pub mod routing;
pub mod views;

pub use client::{Backend, EntityClient};
pub use errors::{AuthError, ServiceError};
pub use pages::{load_page, PageView, ViewContext};
pub use routing::{resolve_page, Page};
