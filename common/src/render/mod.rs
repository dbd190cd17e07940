//! Placeholder substitution for call scripts.
//!
//! A template body carries `{{field}}` tokens. [`render`] replaces every token
//! whose key is present in the supplied fields with that field's text, and
//! leaves tokens for absent keys exactly as written.
//!
//! Substitution is one left-to-right scan over the template: text that was
//! inserted for a placeholder is never scanned again, so a value that itself
//! contains `{{...}}` lands verbatim and the order in which fields are supplied
//! cannot change the result. When two keys could match at the same position
//! (`{{a}}` vs `{{a}}b}}`), the longer key wins.

use crate::model::template::{DEFAULT_PERSONA, Template, TemplateEntry, TemplateMap};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Text inserted in place of a placeholder.
///
/// Falsy values (`None`, `null`, `false`, `0`, `""`) all render as an empty string.
pub trait PlaceholderValue {
    fn placeholder_text(&self) -> Cow<'_, str>;
}

impl PlaceholderValue for str {
    fn placeholder_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl PlaceholderValue for String {
    fn placeholder_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: PlaceholderValue + ?Sized> PlaceholderValue for &T {
    fn placeholder_text(&self) -> Cow<'_, str> {
        (**self).placeholder_text()
    }
}

impl<T: PlaceholderValue> PlaceholderValue for Option<T> {
    fn placeholder_text(&self) -> Cow<'_, str> {
        match self {
            Some(v) => v.placeholder_text(),
            None => Cow::Borrowed(""),
        }
    }
}

impl PlaceholderValue for Value {
    fn placeholder_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null | Value::Bool(false) => Cow::Borrowed(""),
            Value::Number(n) if n.as_f64() == Some(0.0) => Cow::Borrowed(""),
            other => display_text(other),
        }
    }
}

/// String form of a JSON value once it is known to be truthy.
fn display_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(display_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Substitutes `{{key}}` tokens in `template` with the matching field values.
pub fn render<K, V>(template: &str, fields: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: PlaceholderValue,
{
    let values: HashMap<String, String> = fields
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.placeholder_text().into_owned()))
        .collect();

    if values.is_empty() || !template.contains(OPEN) {
        return template.to_string();
    }

    let mut keys: Vec<&str> = values.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let hit = keys
            .iter()
            .find(|key| after.starts_with(**key) && after[key.len()..].starts_with(CLOSE));

        match hit {
            Some(key) => {
                out.push_str(&values[*key]);
                rest = &after[key.len() + CLOSE.len()..];
            }
            None => {
                // Only the first brace is consumed so `{{{key}}}` still resolves.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders a stored template entry, whatever shape it was saved in.
pub fn render_entry<K, V>(entry: &TemplateEntry, fields: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: PlaceholderValue,
{
    render(entry.content(), fields)
}

/// The template for `persona`, or the default persona's template when that key is unknown.
pub fn resolve_template<'a>(templates: &'a TemplateMap, persona: Option<&str>) -> Option<&'a Template> {
    let key = persona.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PERSONA);
    templates
        .get(key)
        .or_else(|| templates.get(DEFAULT_PERSONA))
}
