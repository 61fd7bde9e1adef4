use serde::Serialize;

use crate::content::BUSINESS;
use crate::routing::Page;

#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
    pub business_name: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: &'static str,
    pub service_area: &'static str,
    pub request_service_url: String,
}

pub fn load() -> ContactPage {
    ContactPage {
        business_name: BUSINESS.legal_name,
        phone: BUSINESS.phone,
        email: BUSINESS.email,
        hours: BUSINESS.hours,
        service_area: BUSINESS.service_area,
        request_service_url: Page::RequestService.url(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_business_contact_details() {
        let page = load();
        assert_eq!(page.phone, "(555) 123-4567");
        assert_eq!(page.email, "info@holliswilliams.com");
        assert_eq!(page.request_service_url, "/RequestService");
    }
}
