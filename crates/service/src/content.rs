//! Fixed marketing copy and business details shown on the public pages.

use serde::Serialize;

pub struct Business {
    pub name: &'static str,
    pub legal_name: &'static str,
    pub tagline: &'static str,
    pub about: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: &'static str,
    pub service_area: &'static str,
    pub footer_services: &'static [&'static str],
    pub copyright_year: u16,
}

pub const BUSINESS: Business = Business {
    name: "Hollis Williams",
    legal_name: "Hollis Williams LLC",
    tagline: "Professional Landscaping Services",
    about: "Professional landscaping services for residential and commercial properties.",
    phone: "(555) 123-4567",
    email: "info@holliswilliams.com",
    hours: "Mon-Sat, 7am-6pm",
    service_area: "Residential and commercial properties across the metro area",
    footer_services: &["Lawn Maintenance", "Landscape Design", "Seasonal Cleanups", "Tree & Shrub Care"],
    copyright_year: 2024,
};

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCategory {
    pub title: &'static str,
    pub description: &'static str,
    pub services: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub text: &'static str,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub text: &'static str,
}

pub const SERVICE_CATEGORIES: [ServiceCategory; 4] = [
    ServiceCategory {
        title: "Lawn Maintenance",
        description: "Regular mowing, edging, and trimming to keep your lawn pristine",
        services: &["Mowing", "Edging", "Trimming", "Weed Control"],
    },
    ServiceCategory {
        title: "Landscape Design",
        description: "Transform your outdoor space with professional design and installation",
        services: &["Garden Beds", "Plant Installation", "Mulching", "Hardscaping"],
    },
    ServiceCategory {
        title: "Seasonal Services",
        description: "Prepare your property for every season with expert care",
        services: &["Spring Cleanup", "Fall Cleanup", "Leaf Removal", "Aeration"],
    },
    ServiceCategory {
        title: "Tree & Shrub Care",
        description: "Expert pruning and maintenance for healthy, beautiful plants",
        services: &["Pruning", "Trimming", "Disease Treatment", "Removal"],
    },
];

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Sarah Martinez",
        text: "Hollis Williams transformed our backyard into an oasis. Professional, reliable, and stunning results!",
        rating: 5,
    },
    Testimonial {
        name: "Michael Chen",
        text: "Best landscaping service in the area. They're always on time and do exceptional work.",
        rating: 5,
    },
    Testimonial {
        name: "Jennifer Thompson",
        text: "I've used them for three years now. Consistent quality and friendly service every time.",
        rating: 5,
    },
];

pub const HIGHLIGHTS: [Highlight; 3] = [
    Highlight { title: "Licensed & Insured", text: "Fully licensed and insured for your peace of mind." },
    Highlight { title: "5-Star Service", text: "Consistently rated five stars by the neighbors we serve." },
    Highlight { title: "Reliable Scheduling", text: "We show up when we say we will, every visit." },
];
