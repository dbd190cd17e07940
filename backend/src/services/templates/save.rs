use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::Template;
use common::requests::UpdateTemplateRequest;
use common::responses::TemplateSavedResponse;
use log::{error, info};

/// Actix web handler for `PUT /api/templates/{persona}`.
///
/// # Returns
/// - `200 OK` with the message and the complete template set.
/// - `400 Bad Request` when the body has no template content.
/// - `503 Service Unavailable` when the template could not be persisted.
pub async fn process(
    state: web::Data<AppState>,
    persona: web::Path<String>,
    payload: web::Json<UpdateTemplateRequest>,
) -> impl Responder {
    match save_template(&state, persona.into_inner(), payload.into_inner()).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => {
            error!("Saving template failed: {}", e);
            e.error_response()
        }
    }
}

async fn save_template(
    state: &AppState,
    persona: String,
    payload: UpdateTemplateRequest,
) -> Result<TemplateSavedResponse, ServiceError> {
    if persona.trim().is_empty() {
        return Err(ServiceError::bad_request("Persona is required"));
    }
    let content = payload
        .template
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServiceError::bad_request("Template content is required"))?;
    let title = payload
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| persona.clone());

    let templates = state
        .templates
        .upsert(persona.clone(), Template::new(title, content))
        .await?;
    info!("Template '{}' saved ({} templates)", persona, templates.len());

    Ok(TemplateSavedResponse {
        message: "Template updated successfully".to_string(),
        templates,
    })
}
