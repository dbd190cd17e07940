//! Pushes a contact card to the configured user's Slack direct messages.
//!
//! Route: `POST /api/send-to-slack` with `{ contact }`. The push is only
//! available when `SLACK_BOT_TOKEN` and `SLACK_USER_ID` are both set.

use actix_web::web::{post, ServiceConfig};

pub mod client;
mod send;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/api/send-to-slack", post().to(send::process));
}
