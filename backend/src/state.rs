use crate::config::Config;
use crate::services::contacts::store::ContactStore;
use crate::services::slack::client::SlackClient;
use crate::services::templates::store::TemplateStore;
use std::sync::Arc;

/// Shared handles injected into every handler as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<TemplateStore>,
    pub contacts: Arc<ContactStore>,
    /// Absent when no Slack credentials are configured.
    pub slack: Option<Arc<SlackClient>>,
    /// Largest accepted multipart part, in bytes.
    pub upload_limit: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            templates: Arc::new(TemplateStore::new(config.database_path.clone())),
            contacts: Arc::new(ContactStore::new(config.database_path.clone())),
            slack: config
                .slack
                .as_ref()
                .map(|slack| Arc::new(SlackClient::new(slack.clone()))),
            upload_limit: config.upload_limit,
        }
    }
}
