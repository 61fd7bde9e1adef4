use serde::Serialize;

use crate::content::{Highlight, ServiceCategory, Testimonial, BUSINESS, HIGHLIGHTS, SERVICE_CATEGORIES, TESTIMONIALS};
use crate::routing::Page;

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub headline: &'static str,
    pub intro: &'static str,
    pub call_to_action_url: String,
    pub phone: &'static str,
    pub service_categories: Vec<ServiceCategory>,
    pub highlights: Vec<Highlight>,
    pub testimonials: Vec<Testimonial>,
}

pub fn load() -> HomePage {
    HomePage {
        headline: BUSINESS.tagline,
        intro: BUSINESS.about,
        call_to_action_url: Page::RequestService.url(),
        phone: BUSINESS.phone,
        service_categories: SERVICE_CATEGORIES.to_vec(),
        highlights: HIGHLIGHTS.to_vec(),
        testimonials: TESTIMONIALS.to_vec(),
    }
}
