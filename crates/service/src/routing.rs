//! Path-to-page table for the app shell.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    Dashboard,
    Customers,
    Jobs,
    Calendar,
    Invoices,
    Home,
    RequestService,
    MyRequests,
    Contact,
}

impl Page {
    /// Declaration order; the first entry is the fallback page.
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::Customers,
        Page::Jobs,
        Page::Calendar,
        Page::Invoices,
        Page::Home,
        Page::RequestService,
        Page::MyRequests,
        Page::Contact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Customers => "Customers",
            Page::Jobs => "Jobs",
            Page::Calendar => "Calendar",
            Page::Invoices => "Invoices",
            Page::Home => "Home",
            Page::RequestService => "RequestService",
            Page::MyRequests => "MyRequests",
            Page::Contact => "Contact",
        }
    }

    pub fn url(&self) -> String {
        format!("/{}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Resolve a request path to a page: last path segment, case-insensitive,
/// query string and trailing slash ignored. Anything unknown falls back to
/// the first declared page.
pub fn resolve_page(path: &str) -> Page {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    let last = path.rsplit('/').next().unwrap_or_default();
    Page::from_name(last).unwrap_or(Page::ALL[0])
}
