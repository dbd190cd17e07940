use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::responses::RoleContactsResponse;
use log::error;

/// Actix web handler for `GET /api/contacts/{role}`.
///
/// Matching is exact and case-sensitive; an unknown role yields an empty list.
pub async fn process(state: web::Data<AppState>, role: web::Path<String>) -> impl Responder {
    let role = role.into_inner();
    match state.contacts.by_role(&role).await {
        Ok(contacts) => HttpResponse::Ok().json(RoleContactsResponse { contacts, role }),
        Err(e) => {
            error!("Listing contacts for role '{}' failed: {}", role, e);
            e.error_response()
        }
    }
}
