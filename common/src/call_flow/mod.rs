//! Paging through a batch of contacts with one script template.
//!
//! Contacts carry a template selector (`Contact::template`). A session holds the
//! contacts sharing one selector and a cursor over them; the selector is matched
//! against template titles first and template keys second.

use crate::model::contact::Contact;
use crate::model::template::TemplateMap;
use crate::render::render;

/// Distinct, non-empty template selectors in first-seen order.
pub fn available_templates(contacts: &[Contact]) -> Vec<String> {
    let mut selectors: Vec<String> = Vec::new();
    for selector in contacts.iter().filter_map(|c| c.template.as_deref()) {
        if !selector.is_empty() && !selectors.iter().any(|s| s == selector) {
            selectors.push(selector.to_string());
        }
    }
    selectors
}

/// Template key for a selector: a title match wins over a key match.
pub fn find_template_key<'a>(templates: &'a TemplateMap, selector: &str) -> Option<&'a str> {
    templates
        .iter()
        .find(|(_, t)| t.title == selector)
        .or_else(|| templates.get_key_value(selector))
        .map(|(key, _)| key.as_str())
}

/// What the session can show for the contact under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Rendered(String),
    NoMatchingTemplate,
    NoContact,
}

impl ScriptOutcome {
    /// Text shown to the caller in place of a script.
    pub fn into_text(self) -> String {
        match self {
            ScriptOutcome::Rendered(script) => script,
            ScriptOutcome::NoMatchingTemplate => {
                "No templates match the selected template.".to_string()
            }
            ScriptOutcome::NoContact => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallSession<'a> {
    selector: String,
    contacts: Vec<&'a Contact>,
    index: usize,
}

impl<'a> CallSession<'a> {
    pub fn new(contacts: &'a [Contact], selector: impl Into<String>) -> Self {
        let selector = selector.into();
        let contacts = contacts
            .iter()
            .filter(|c| c.template.as_deref() == Some(selector.as_str()))
            .collect();
        CallSession {
            selector,
            contacts,
            index: 0,
        }
    }

    /// Moves the cursor to `index`, clamped to the last contact.
    pub fn seek(mut self, index: usize) -> Self {
        self.index = index.min(self.contacts.len().saturating_sub(1));
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'a Contact> {
        self.contacts.get(self.index).copied()
    }

    /// Advances unless already on the last contact. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.contacts.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Steps back unless already on the first contact. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn script(&self, templates: &TemplateMap) -> ScriptOutcome {
        let Some(contact) = self.current() else {
            return ScriptOutcome::NoContact;
        };
        let Some(template) =
            find_template_key(templates, &self.selector).and_then(|key| templates.get(key))
        else {
            return ScriptOutcome::NoMatchingTemplate;
        };
        ScriptOutcome::Rendered(render(&template.content, contact.fields()))
    }
}
