//! Landing page sections.

use crate::config::ContentSettings;
use crate::routes::landing::{ContactField, ContactForm, FaqEntry, Feature, PageContent};

const FORM_SUBMIT_BASE: &str = "https://formsubmit.co";

fn features() -> Vec<Feature> {
    vec![
        Feature {
            image: "yoga.jpg".to_string(),
            title: "Find Your Inner Balance with Yoga".to_string(),
            body: "Unwind and rejuvenate with our yoga classes. Perfect for all levels, these \
                   sessions enhance flexibility, relieve stress, and boost mental clarity."
                .to_string(),
        },
        Feature {
            image: "hiit_gym.jpeg".to_string(),
            title: "Push Your Limits with HIIT & CrossFit".to_string(),
            body: "Burn calories and build strength fast with high-intensity interval training \
                   and dynamic CrossFit workouts. Perfect for those seeking maximum results in \
                   minimal time."
                .to_string(),
        },
        Feature {
            image: "treadmill.jpg".to_string(),
            title: "Build Power and Confidence with Strength Training".to_string(),
            body: "Enhance muscle tone and overall fitness with our expert-led strength training \
                   classes. Ideal for sculpting your body and boosting your physical endurance."
                .to_string(),
        },
    ]
}

fn faq() -> Vec<FaqEntry> {
    let entries = [
        (
            "Do I need a membership to use the gym or attend classes?",
            "No, you can pay per session for classes or equipment usage. Memberships offer added \
             benefits like discounts, priority bookings, and exclusive access to events.",
        ),
        (
            "What kind of classes do you offer?",
            "We offer group classes like yoga, HIIT & CrossFit, and strength training. These \
             classes are designed to cater to all fitness levels and help you achieve your \
             fitness goals.",
        ),
        (
            "Can beginners join the gym and classes?",
            "Absolutely! Our gym and classes are beginner-friendly, with professional trainers to \
             guide you every step of the way.",
        ),
        (
            "What equipment is available for solo workouts?",
            "We provide a wide range of strength and cardio equipment, including treadmills, \
             ellipticals, free weights, resistance machines, and more.",
        ),
        (
            "Are personal trainers available?",
            "Yes, personal trainers are available to help design customized workout plans \
             tailored to your individual needs and goals. Additional fees may apply.",
        ),
    ];
    entries
        .iter()
        .map(|(q, a)| FaqEntry {
            question: q.to_string(),
            answer: a.to_string(),
        })
        .collect()
}

/// Contact form that submits straight to the form relay for `email`.
pub fn contact_form(email: &str) -> ContactForm {
    let field = |name: &str, kind: &str, placeholder: Option<&str>, required: bool| ContactField {
        name: name.to_string(),
        kind: kind.to_string(),
        placeholder: placeholder.map(str::to_string),
        value: None,
        required,
    };

    ContactForm {
        action: format!("{}/{}", FORM_SUBMIT_BASE, email),
        method: "POST".to_string(),
        fields: vec![
            ContactField {
                value: Some("false".to_string()),
                ..field("_captcha", "hidden", None, false)
            },
            field("name", "text", Some("Your name"), true),
            field("email", "email", Some("Your email"), true),
            field("message", "textarea", Some("Your message here"), false),
        ],
        submit_label: "Send".to_string(),
    }
}

pub fn page_content(settings: &ContentSettings) -> PageContent {
    PageContent {
        product_name: settings.product_name.clone(),
        tagline: settings.tagline.clone(),
        description: settings.description.clone(),
        booking_url: settings.checkout_url.clone(),
        booking_label: "Book your class today".to_string(),
        features: features(),
        demo_video_url: settings.demo_video_url.clone(),
        faq: faq(),
        contact_form: contact_form(&settings.contact_email),
        portfolio_url: settings.portfolio_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_content_defaults() {
        let page = page_content(&ContentSettings::default());
        assert_eq!(page.product_name, "The Fitness Hive");
        assert_eq!(page.features.len(), 3);
        assert_eq!(page.faq.len(), 5);
        assert!(page.booking_url.starts_with("https://buy.stripe.com/"));
    }

    #[test]
    fn test_contact_form_targets_relay() {
        let form = contact_form("owner@example.com");
        assert_eq!(form.action, "https://formsubmit.co/owner@example.com");
        assert_eq!(form.method, "POST");

        let captcha = &form.fields[0];
        assert_eq!(captcha.kind, "hidden");
        assert_eq!(captcha.value.as_deref(), Some("false"));

        let required: Vec<&str> = form
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(required, vec!["name", "email"]);
    }
}
