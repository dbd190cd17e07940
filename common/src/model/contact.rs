use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Persona label used for contacts that were not mapped to one.
pub const UNASSIGNED_PERSONA: &str = "Other";

/// A lead produced by applying a `ColumnMapping` to one CSV row.
///
/// Only mapped fields with a value are present. Any extra keys sent by a client
/// are kept in `extra` so they can still be substituted into a script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Template selector value; contacts sharing it form one call session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Contact {
    /// Key/value pairs available for placeholder substitution.
    ///
    /// Absent fields are skipped, so their placeholders stay untouched.
    pub fn fields(&self) -> Vec<(&str, Value)> {
        let named = [
            ("name", &self.name),
            ("role", &self.role),
            ("persona", &self.persona),
            ("startup", &self.startup),
            ("phone", &self.phone),
            ("linkedin", &self.linkedin),
            ("template", &self.template),
        ];

        let mut fields: Vec<(&str, Value)> = named
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, Value::String(v.clone()))))
            .collect();
        fields.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())));
        fields
    }

    pub fn persona_or_other(&self) -> &str {
        match self.persona.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => UNASSIGNED_PERSONA,
        }
    }
}

/// Distinct personas in first-seen order, `Other` standing in for missing ones.
pub fn distinct_personas(contacts: &[Contact]) -> Vec<String> {
    let mut personas: Vec<String> = Vec::new();
    for contact in contacts {
        let persona = contact.persona_or_other();
        if !personas.iter().any(|p| p == persona) {
            personas.push(persona.to_string());
        }
    }
    personas
}
