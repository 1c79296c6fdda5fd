//! Default catalog inserted on first boot. Every backend seeds from the
//! same definitions; names and codes double as the natural keys the
//! idempotent insert paths match on.

use crate::models::academy::NewCourse;
use crate::models::catalog::{NewDiscountCode, NewService, ServiceCategory};

pub fn default_services() -> Vec<NewService> {
    let service = |name: &str, category, price, features: &[&str]| NewService {
        name: name.to_string(),
        category,
        price,
        features: features.iter().map(|f| f.to_string()).collect(),
        is_active: true,
    };

    vec![
        service(
            "Business Website",
            ServiceCategory::WebDevelopment,
            120_000,
            &["Responsive layout", "CMS setup", "Contact forms", "SEO basics"],
        ),
        service(
            "E-commerce Store",
            ServiceCategory::WebDevelopment,
            250_000,
            &["Product catalog", "Checkout flow", "Payment setup", "Order tracking"],
        ),
        service(
            "Mobile App",
            ServiceCategory::MobileDevelopment,
            400_000,
            &["iOS and Android", "Push notifications", "App store publishing"],
        ),
        service(
            "Brand Identity",
            ServiceCategory::Design,
            80_000,
            &["Logo", "Color palette", "Typography", "Brand guidelines"],
        ),
        service(
            "Social Media Campaign",
            ServiceCategory::Marketing,
            60_000,
            &["Content calendar", "Ad creatives", "Monthly reporting"],
        ),
        service(
            "Blog Content Pack",
            ServiceCategory::ContentWriting,
            30_000,
            &["8 articles", "Keyword research", "Editing passes"],
        ),
    ]
}

pub fn default_discount_codes() -> Vec<NewDiscountCode> {
    vec![
        NewDiscountCode {
            code: "WELCOME10".to_string(),
            percent_off: 10,
            is_active: true,
            expires_at: None,
        },
        NewDiscountCode {
            code: "LAUNCH20".to_string(),
            percent_off: 20,
            is_active: true,
            expires_at: None,
        },
    ]
}

pub fn default_courses() -> Vec<NewCourse> {
    let course = |title: &str, description: &str, price, lesson_count| NewCourse {
        title: title.to_string(),
        description: description.to_string(),
        price,
        lesson_count,
        is_active: true,
    };

    vec![
        course(
            "Web Development Fundamentals",
            "HTML, CSS and JavaScript from zero to a deployed site.",
            45_000,
            24,
        ),
        course(
            "UI Design Essentials",
            "Layout, color and typography for product interfaces.",
            35_000,
            16,
        ),
        course(
            "Digital Marketing Basics",
            "Channels, funnels and measuring what works.",
            25_000,
            12,
        ),
    ]
}
