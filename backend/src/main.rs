mod config;
mod db;
mod error;
mod services;
mod state;

use crate::config::Config;
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    db::init(&config.database_path).map_err(io::Error::other)?;
    info!("Using database {}", config.database_path.display());
    if config.slack.is_none() {
        warn!("SLACK_BOT_TOKEN or SLACK_USER_ID not set, Slack push disabled");
    }

    let state = AppState::new(&config);
    let json_limit = config.json_limit;

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
