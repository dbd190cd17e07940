//! # Template Service Module
//!
//! This module aggregates all API endpoints related to call script templates.
//! It acts as a router, directing incoming HTTP requests under the `/api/templates`
//! path to the appropriate handler logic defined in its sub-modules.
//!
//! ## Sub-modules:
//! - `list`: Returns every template, resolved through the layered `store`.
//! - `save`: Creates or updates the template of one persona.
//! - `preview`: Renders a template body to display markup.
//! - `store`: Cache → SQLite → defaults lookup shared by the handlers above and
//!   by the script services.

mod list;
mod preview;
mod save;
pub mod store;

use actix_web::web::{get, put, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns `{ templates }`, a map from persona key to
///       `{ title, content }`.
///
/// *   **`PUT /{persona}`**:
///     - **Handler**: `save::process`
///     - **Description**: Expects `{ template, title? }`. Stores the body under the
///       persona key, defaulting the title to the key, and answers with the full set.
///
/// *   **`GET /{persona}/preview`**:
///     - **Handler**: `preview::process`
///     - **Description**: Returns `{ persona, title, html }` where `html` is the
///       template body passed through the markup formatter.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{persona}", put().to(save::process))
        .route("/{persona}/preview", get().to(preview::process))
}
