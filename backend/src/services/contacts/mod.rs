//! Contact lists imported from CSV files.
//!
//! The provided routes are:
//! - `POST /api/upload`: multipart upload with a `csv` file part and an optional
//!   `mapping` JSON part. Every row is mapped to a contact and the stored list is
//!   replaced. The response carries the contacts, the distinct personas found
//!   (`roles`), the CSV headers, the mapping that was applied and whether the file
//!   is byte-identical to the previous upload.
//!
//! - `GET /api/contacts`: the stored list with its size.
//!
//! - `GET /api/contacts/{role}`: the stored contacts whose `role` equals the path
//!   segment.

use actix_web::web::{get, post, scope, ServiceConfig};

mod by_role;
mod list;
pub mod store;
mod upload;

const API_PATH: &str = "/api/contacts";

/// Registers the upload route and the `/api/contacts` scope.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/api/upload", post().to(upload::process)).service(
        scope(API_PATH)
            .route("", get().to(list::process))
            .route("/{role}", get().to(by_role::process)),
    );
}
