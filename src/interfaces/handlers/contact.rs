use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::{
    entities::contact::{ContactResponse, SubmissionInput},
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// `POST /contact`
pub async fn submit_contact(
    request: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> impl Responder {
    match process_submission(&request, &state, payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            if e.is_internal() {
                tracing::error!(error = %e, "Contact submission failed");
            } else {
                tracing::debug!(error = %e, "Contact submission refused");
            }
            e.to_http_response()
        }
    }
}

/// Any other method on `/contact`
pub async fn method_not_allowed() -> impl Responder {
    AppError::MethodNotAllowed.to_http_response()
}

async fn process_submission(
    request: &HttpRequest,
    state: &AppState,
    payload: web::Payload,
) -> Result<ContactResponse, AppError> {
    let client_id = get_client_ip(request);
    if !state.rate_limiter.admit(&client_id).await? {
        return Err(AppError::RateLimited);
    }

    let body = payload
        .to_bytes_limited(state.max_body_bytes)
        .await
        .map_err(|_| {
            AppError::InvalidPayload(format!("body exceeds {} bytes", state.max_body_bytes))
        })?
        .map_err(|e| AppError::InternalError(format!("failed to read request body: {}", e)))?;

    let input: SubmissionInput = serde_json::from_slice(&body)?;

    state.contact_handler.submit(input).await
}
