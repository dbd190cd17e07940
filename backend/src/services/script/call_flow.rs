//! `POST /api/call-flow`: one page of a calling session.
//!
//! ## Workflow
//! 1. Load the stored contacts and the current templates.
//! 2. Pick the selector: the requested one, or the first selector found among
//!    the contacts.
//! 3. Build a `CallSession` over the contacts with that selector and move its
//!    cursor to the requested index (clamped into range).
//! 4. Render the script of the contact under the cursor, or the "no matching
//!    template" notice when no template title or key matches the selector.

use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::call_flow::{available_templates, CallSession};
use common::markup;
use common::requests::CallFlowRequest;
use common::responses::CallFlowResponse;
use log::error;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CallFlowRequest>,
) -> impl Responder {
    match call_flow_page(&state, payload.into_inner()).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => {
            error!("Building call flow failed: {}", e);
            e.error_response()
        }
    }
}

async fn call_flow_page(
    state: &AppState,
    request: CallFlowRequest,
) -> Result<CallFlowResponse, ServiceError> {
    let contacts = state.contacts.list().await?;
    let templates = state.templates.load().await;
    let selectors = available_templates(&contacts);

    let selected = request
        .template
        .filter(|t| !t.is_empty())
        .or_else(|| selectors.first().cloned());

    let Some(selected) = selected else {
        return Ok(CallFlowResponse {
            templates: selectors,
            selected: None,
            index: 0,
            total: 0,
            contact: None,
            script: String::new(),
            html: String::new(),
        });
    };

    let session = CallSession::new(&contacts, selected.as_str()).seek(request.index);
    let script = session.script(&templates).into_text();
    let html = if script.is_empty() {
        String::new()
    } else {
        markup::format(&script)
    };

    Ok(CallFlowResponse {
        index: session.position(),
        total: session.len(),
        contact: session.current().cloned(),
        templates: selectors,
        selected: Some(selected),
        script,
        html,
    })
}
