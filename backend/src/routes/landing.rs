use serde::{Deserialize, Serialize};

/// A class highlighted in the features section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub image: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Input rendered inside the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactField {
    pub name: String,
    /// HTML input type: "text", "email", "textarea" or "hidden"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub required: bool,
}

/// Contact form posted directly to the third-party submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    pub action: String,
    pub method: String,
    pub fields: Vec<ContactField>,
    pub submit_label: String,
}

/// Static sections of the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub product_name: String,
    pub tagline: String,
    pub description: String,
    pub booking_url: String,
    pub booking_label: String,
    pub features: Vec<Feature>,
    pub demo_video_url: String,
    pub faq: Vec<FaqEntry>,
    pub contact_form: ContactForm,
    pub portfolio_url: String,
}

pub const GET_PAGE_CONTENT: &str = "get_page_content";
