use crate::model::column_mapping::ColumnMapping;
use crate::model::contact::Contact;
use crate::model::template::TemplateMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesResponse {
    pub templates: TemplateMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSavedResponse {
    pub message: String,
    pub templates: TemplateMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatePreviewResponse {
    pub persona: String,
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub contacts: Vec<Contact>,
    pub roles: Vec<String>,
    pub headers: Vec<String>,
    pub mapping: ColumnMapping,
    pub total_contacts: usize,
    /// Whether the file is byte-identical to the previous upload.
    pub unchanged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
    pub total_contacts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleContactsResponse {
    pub contacts: Vec<Contact>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub script: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallFlowResponse {
    /// Every template selector present among the stored contacts.
    pub templates: Vec<String>,
    pub selected: Option<String>,
    pub index: usize,
    pub total: usize,
    pub contact: Option<Contact>,
    pub script: String,
    pub html: String,
}
