use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::responses::TemplatesResponse;

/// Actix web handler for `GET /api/templates`.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let templates = state.templates.load().await;
    HttpResponse::Ok().json(TemplatesResponse { templates })
}
