use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::SendContactRequest;
use common::responses::MessageBody;
use log::{error, info};

/// Actix web handler for `POST /api/send-to-slack`.
///
/// # Returns
/// - `200 OK` once the contact was posted.
/// - `400 Bad Request` when Slack is not configured or no contact is given.
/// - `503 Service Unavailable` when the Slack API call failed.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SendContactRequest>,
) -> impl Responder {
    match send_contact(&state, payload.into_inner()).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => e.error_response(),
    }
}

async fn send_contact(
    state: &AppState,
    payload: SendContactRequest,
) -> Result<MessageBody, ServiceError> {
    let client = state.slack.as_ref().ok_or_else(|| {
        ServiceError::bad_request("Missing Slack configuration (SLACK_BOT_TOKEN, SLACK_USER_ID)")
    })?;
    let contact = payload
        .contact
        .ok_or_else(|| ServiceError::bad_request("Contact information is required"))?;

    client.send_contact(&contact).await.map_err(|e| {
        error!("Slack API error: {}", e);
        ServiceError::Slack("Failed to send message to Slack".into())
    })?;
    info!("Contact {:?} sent to Slack", contact.name);

    Ok(MessageBody {
        message: "Contact sent to Slack successfully".to_string(),
    })
}
