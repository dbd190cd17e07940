//! Script generation for a single contact and for a paged calling session.
//!
//! The provided routes are:
//! - `POST /api/generate-script`: renders the persona's template (the default
//!   persona's when unknown) against the given contact.
//! - `POST /api/call-flow`: pages through the stored contacts that share a
//!   template selector. See `call_flow` for the details.

use actix_web::web::{post, ServiceConfig};

mod call_flow;
mod generate;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/api/generate-script", post().to(generate::process))
        .route("/api/call-flow", post().to(call_flow::process));
}
