use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Persona used when a caller names none, and the fallback for unknown ones.
pub const DEFAULT_PERSONA: &str = "Enterprise";

/// A call script template: a display title and a body with `{{field}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub title: String,
    pub content: String,
}

impl Template {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Template {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Templates keyed by persona. Keys are unique; ordering carries no meaning.
pub type TemplateMap = BTreeMap<String, Template>;

/// Any value a caller may hand over as "the template".
///
/// Older stores kept bare strings instead of records. Anything else reads as
/// an empty body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    Record(Template),
    Legacy(String),
    Other(Value),
}

impl TemplateEntry {
    pub fn content(&self) -> &str {
        match self {
            TemplateEntry::Record(t) => &t.content,
            TemplateEntry::Legacy(s) => s,
            TemplateEntry::Other(_) => "",
        }
    }
}

impl From<Template> for TemplateEntry {
    fn from(t: Template) -> Self {
        TemplateEntry::Record(t)
    }
}

/// Templates seeded before anything has been saved.
pub fn default_templates() -> TemplateMap {
    let seeds = [
        (
            "Enterprise",
            "Hi {{name}}, this is [Your Name] from [Your Company]. I noticed {{startup}} has been growing rapidly in the {{persona}} space. I help companies like yours streamline their sales processes. Do you have 2 minutes to discuss how we could help {{startup}} increase revenue?",
        ),
        (
            "Startup",
            "Hi {{name}}, I'm reaching out because I noticed {{startup}} is in the {{persona}} space. I work with companies to help optimize their development workflows. Would you be interested in a quick 5-minute conversation about how we could help {{startup}} accelerate development?",
        ),
        (
            "SMB",
            "Hi {{name}}, I help companies like {{startup}} increase their close rates. I'd love to share a quick strategy that could help {{startup}} hit their revenue targets faster. Do you have 2 minutes to chat?",
        ),
        (
            "Tech",
            "Hi {{name}}, I noticed {{startup}} has been doing great work in the {{persona}} space. I help tech companies optimize their lead generation. Would you be interested in a brief conversation about how we could help {{startup}} generate more qualified leads?",
        ),
    ];

    seeds
        .into_iter()
        .map(|(key, content)| (key.to_string(), Template::new(key, content)))
        .collect()
}
