//! Persistent shell around every page: sidebar navigation, header, footer.

use serde::Serialize;

use crate::content::BUSINESS;
use crate::routing::Page;

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub business_name: &'static str,
    pub tagline: &'static str,
    pub phone: &'static str,
    pub book_service_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Footer {
    pub about: &'static str,
    pub contact_lines: Vec<String>,
    pub services: Vec<&'static str>,
    pub copyright: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Shell {
    pub current: Page,
    pub navigation: Vec<NavItem>,
    pub header: Header,
    pub footer: Footer,
}

const NAVIGATION: [(&str, Page); 4] = [
    ("Home", Page::Home),
    ("Request Service", Page::RequestService),
    ("My Requests", Page::MyRequests),
    ("Contact Us", Page::Contact),
];

pub fn shell_for(current: Page) -> Shell {
    let navigation = NAVIGATION
        .iter()
        .map(|(title, page)| NavItem { title: *title, url: page.url(), active: *page == current })
        .collect();
    Shell {
        current,
        navigation,
        header: Header {
            business_name: BUSINESS.legal_name,
            tagline: BUSINESS.tagline,
            phone: BUSINESS.phone,
            book_service_url: Page::RequestService.url(),
        },
        footer: Footer {
            about: BUSINESS.about,
            contact_lines: vec![
                format!("Phone: {}", BUSINESS.phone),
                format!("Email: {}", BUSINESS.email),
                format!("Hours: {}", BUSINESS.hours),
            ],
            services: BUSINESS.footer_services.to_vec(),
            copyright: format!("© {} {}. All rights reserved.", BUSINESS.copyright_year, BUSINESS.legal_name),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_active_nav_item() {
        let shell = shell_for(Page::MyRequests);
        let active: Vec<_> = shell.navigation.iter().filter(|n| n.active).map(|n| n.title).collect();
        assert_eq!(active, ["My Requests"]);
        assert_eq!(shell.header.book_service_url, "/RequestService");
    }

    #[test]
    fn admin_pages_have_no_active_nav_item() {
        assert!(shell_for(Page::Dashboard).navigation.iter().all(|n| !n.active));
    }
}
