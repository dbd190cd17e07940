use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::markup;
use common::render::{render, resolve_template};
use common::requests::GenerateScriptRequest;
use common::responses::ScriptResponse;
use log::{debug, error};

/// Actix web handler for `POST /api/generate-script`.
///
/// # Returns
/// - `200 OK` with the plain script and its display markup.
/// - `400 Bad Request` when no contact is given.
/// - `404 Not Found` when neither the persona nor the default persona has a template.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GenerateScriptRequest>,
) -> impl Responder {
    match generate_script(&state, payload.into_inner()).await {
        Ok(script) => HttpResponse::Ok().json(script),
        Err(e) => {
            error!("Generating script failed: {}", e);
            e.error_response()
        }
    }
}

async fn generate_script(
    state: &AppState,
    payload: GenerateScriptRequest,
) -> Result<ScriptResponse, ServiceError> {
    let contact = payload
        .contact
        .ok_or_else(|| ServiceError::bad_request("Contact is required"))?;

    let templates = state.templates.load().await;
    let persona = payload.persona.as_deref().filter(|p| !p.is_empty());
    let template = resolve_template(&templates, persona)
        .ok_or_else(|| ServiceError::not_found("No template available"))?;
    debug!("Rendering '{}' for persona {:?}", template.title, persona);

    let script = render(&template.content, &contact);
    Ok(ScriptResponse {
        html: markup::format(&script),
        script,
    })
}
