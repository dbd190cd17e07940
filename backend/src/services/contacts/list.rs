use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::responses::ContactsResponse;
use log::error;

/// Actix web handler for `GET /api/contacts`.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    match state.contacts.list().await {
        Ok(contacts) => HttpResponse::Ok().json(ContactsResponse {
            total_contacts: contacts.len(),
            contacts,
        }),
        Err(e) => {
            error!("Listing contacts failed: {}", e);
            e.error_response()
        }
    }
}
