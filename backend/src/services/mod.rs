use crate::error::ServiceError;
use actix_web::web::{JsonConfig, ServiceConfig};

pub mod contacts;
pub mod script;
pub mod slack;
pub mod templates;

/// Registers every API route on the application.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(templates::configure_routes());
    contacts::configure_routes(cfg);
    script::configure_routes(cfg);
    slack::configure_routes(cfg);
}

/// JSON body extractor settings. Rejected bodies answer with the usual `{error}` body.
pub fn json_config(limit: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| ServiceError::bad_request(err.to_string()).into())
}
