use crate::model::contact::Contact;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `POST /api/generate-script`.
///
/// The contact is kept as raw JSON so that any key the client sends can feed
/// a placeholder, not only the mapped contact fields.
#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    pub contact: Option<Map<String, Value>>,
    pub persona: Option<String>,
}

/// Body of `PUT /api/templates/{persona}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    pub template: Option<String>,
    pub title: Option<String>,
}

/// Body of `POST /api/send-to-slack`.
#[derive(Debug, Deserialize)]
pub struct SendContactRequest {
    pub contact: Option<Contact>,
}

/// Body of `POST /api/call-flow`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CallFlowRequest {
    /// Template selector; the first one found among the contacts when absent.
    pub template: Option<String>,
    pub index: usize,
}
