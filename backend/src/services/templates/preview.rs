use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::markup;
use common::responses::TemplatePreviewResponse;

/// Actix web handler for `GET /api/templates/{persona}/preview`.
///
/// # Returns
/// - `200 OK` with `{ persona, title, html }`.
/// - `404 Not Found` if no template is stored under `persona`.
pub async fn process(state: web::Data<AppState>, persona: web::Path<String>) -> impl Responder {
    match preview_template(&state, persona.into_inner()).await {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => e.error_response(),
    }
}

async fn preview_template(
    state: &AppState,
    persona: String,
) -> Result<TemplatePreviewResponse, ServiceError> {
    let templates = state.templates.load().await;
    let template = templates
        .get(&persona)
        .ok_or_else(|| ServiceError::not_found(format!("Template not found: {}", persona)))?;

    Ok(TemplatePreviewResponse {
        title: template.title.clone(),
        html: markup::format(&template.content),
        persona,
    })
}
